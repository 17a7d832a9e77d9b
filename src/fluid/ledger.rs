/// Water bookkeeping for one simulation instance
///
/// Per-frame counters are zeroed by [`WaterLedger::begin_frame`] and rolled
/// into the running totals by [`WaterLedger::end_frame`]. The renderer only
/// reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterLedger {
    frame: u64,
    total_water: f64,
    added_this_frame: f64,
    decayed_this_frame: f64,
    total_added: f64,
    total_decayed: f64,
}

impl WaterLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger primed with the water present at load time
    pub fn with_initial_water(total_water: f64) -> Self {
        Self {
            total_water,
            ..Self::default()
        }
    }

    /// Start a new frame and return its number (first frame is 1)
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        self.added_this_frame = 0.0;
        self.decayed_this_frame = 0.0;
        self.frame
    }

    /// Record water that actually entered the grid
    pub fn record_added(&mut self, amount: f64) {
        self.added_this_frame += amount;
    }

    /// Record water removed by the drain row
    pub fn record_decayed(&mut self, amount: f64) {
        self.decayed_this_frame += amount;
    }

    /// Close the frame with the freshly summed water total
    pub fn end_frame(&mut self, total_water: f64) {
        self.total_water = total_water;
        self.total_added += self.added_this_frame;
        self.total_decayed += self.decayed_this_frame;

        log::trace!(
            "frame {}: total={:.4} added={:.4} decayed={:.4} total_decayed={:.4}",
            self.frame,
            self.total_water,
            self.added_this_frame,
            self.decayed_this_frame,
            self.total_decayed
        );
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn total_water(&self) -> f64 {
        self.total_water
    }

    pub fn added_this_frame(&self) -> f64 {
        self.added_this_frame
    }

    pub fn decayed_this_frame(&self) -> f64 {
        self.decayed_this_frame
    }

    pub fn total_added(&self) -> f64 {
        self.total_added
    }

    pub fn total_decayed(&self) -> f64 {
        self.total_decayed
    }
}
