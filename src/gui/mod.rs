pub mod connection;
pub mod picker;

use std::path::PathBuf;

use crate::config::PickerConfig;

pub fn run_picker(socket: PathBuf, config: PickerConfig) -> crate::Result<()> {
    use iced::Result as IcedResult;

    let result: IcedResult = picker::run(socket, config);

    result.map_err(|e| crate::Error::Gui(e.to_string()))?;
    Ok(())
}
