use std::path::PathBuf;
use topoconflict::core::io::source::CsvOptions;
use topoconflict::engine::config::AnalysisConfig;

#[derive(Debug)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub csv: CsvOptions,
    pub pretty: bool,
    pub analysis: AnalysisConfig,
}
