use anyhow::{anyhow, bail};
use log::info;
use midir::{MidiOutput, MidiOutputConnection};

/// Opens a MIDI output connection on the given port index, or the first
/// available port when none is given.
pub fn connect(port: Option<usize>) -> anyhow::Result<MidiOutputConnection> {
  let output = MidiOutput::new("segno")?;
  let ports = output.ports();
  if ports.is_empty() {
    bail!("no midi output ports available");
  }

  let index = port.unwrap_or(0);
  let port = ports
    .get(index)
    .ok_or_else(|| anyhow!("midi output port {} out of range, found {}", index, ports.len()))?;
  let name = output
    .port_name(port)
    .unwrap_or_else(|_| "unknown".to_string());
  info!("using midi output port {}: '{}'", index, name);

  output
    .connect(port, "segno-out")
    .map_err(|err| anyhow!("failed to connect to '{}': {}", name, err))
}
