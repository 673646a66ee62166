//! Board configuration compiled from board.toml
//!
//! build.rs has already rejected invalid wiring, so the fallback to the
//! reference board only triggers if the two ever disagree.

use defmt::*;

use terrarium_core::{ActionTable, BoardConfig, ConfigError, Device, OutputBinding, SensorBinding};
use terrarium_hal::UartConfig;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Console UART settings
pub fn serial_config() -> UartConfig {
    UartConfig::with_baudrate(BAUD_RATE)
}

fn from_board_file() -> Result<(BoardConfig, ActionTable), ConfigError> {
    let config = BoardConfig::from_bindings(OUTPUTS, SENSORS, SETTLE_DELAY_MS)?;
    let table = ActionTable::build(&config)?;
    Ok((config, table))
}

/// Load the board wiring and build its command table
pub fn load() -> Result<(BoardConfig, ActionTable), ConfigError> {
    from_board_file().or_else(|e| {
        error!("board.toml rejected: {:?}, using reference wiring", e);
        let config = BoardConfig::default();
        let table = ActionTable::build(&config)?;
        Ok((config, table))
    })
}
