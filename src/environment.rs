use std::fmt;

use crate::config::TIME_TO_FULL_SOOTINESS;

/// How the tree bark changes over the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarkMode {
    /// Soot accumulates linearly until fully sooty
    #[default]
    Dynamic,
    /// Bark stays clean for the whole run
    Clean,
    /// Bark is fully sooty from the first generation
    Sooty,
}

impl fmt::Display for BarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarkMode::Dynamic => write!(f, "dynamic"),
            BarkMode::Clean => write!(f, "clean"),
            BarkMode::Sooty => write!(f, "sooty"),
        }
    }
}

/// Environmental state recomputed once per generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    sootiness: f64,
    bark_mode: BarkMode,
}

impl Environment {
    pub fn new(bark_mode: BarkMode, time_index: u32) -> Self {
        Self {
            sootiness: sootiness_at(bark_mode, time_index),
            bark_mode,
        }
    }

    /// How sooty the trees are, from 0 to 1
    pub fn sootiness(&self) -> f64 {
        self.sootiness
    }

    pub fn bark_mode(&self) -> BarkMode {
        self.bark_mode
    }

    pub fn update(&mut self, time_index: u32) {
        self.sootiness = sootiness_at(self.bark_mode, time_index);
    }

    pub fn set_bark_mode(&mut self, bark_mode: BarkMode, time_index: u32) {
        self.bark_mode = bark_mode;
        self.update(time_index);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(BarkMode::default(), 0)
    }
}

/// Sootiness for a given mode and generation
pub fn sootiness_at(bark_mode: BarkMode, time_index: u32) -> f64 {
    match bark_mode {
        BarkMode::Dynamic => (time_index as f64 / TIME_TO_FULL_SOOTINESS as f64).min(1.0),
        BarkMode::Clean => 0.0,
        BarkMode::Sooty => 1.0,
    }
}
