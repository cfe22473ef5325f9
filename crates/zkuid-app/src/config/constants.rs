pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_DATA_DIR_NAME: &str = ".zkuid";

pub const HISTORY_FILE_NAME: &str = "proof_history.json";
