#[derive(Debug, Clone, Copy)]
pub enum ApiEndpoint {
    Platform,
    Keystore,
    Info,
}

impl ApiEndpoint {
    pub fn path(&self) -> &str {
        match self {
            Self::Platform => "/ext/P",
            Self::Keystore => "/ext/keystore",
            Self::Info => "/ext/info",
        }
    }
}
