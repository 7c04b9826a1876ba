/// Per-component ceilings for the aggregate 0-100 match score.
/// Job fit carries the largest share; location and availability split the
/// remainder evenly.
pub const SUB_SCORE_CAPS: SubScoreCaps = SubScoreCaps {
    job: 40.0,
    location: 30.0,
    availability: 30.0,
};

#[derive(Debug, Clone, Copy)]
pub struct SubScoreCaps {
    pub job: f64,
    pub location: f64,
    pub availability: f64,
}

impl SubScoreCaps {
    pub fn sum(&self) -> f64 {
        self.job + self.location + self.availability
    }
}
