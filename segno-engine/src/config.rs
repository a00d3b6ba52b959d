#[derive(Debug, Clone)]
pub struct EngineConfig {
  pub sample_rate: u32,
  pub control_capacity: usize,
}

impl EngineConfig {
  pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
  pub const DEFAULT_CONTROL_CAPACITY: usize = 16;
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      sample_rate: EngineConfig::DEFAULT_SAMPLE_RATE,
      control_capacity: EngineConfig::DEFAULT_CONTROL_CAPACITY,
    }
  }
}
