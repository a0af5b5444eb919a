pub mod env {
    /// Prefix for all configuration environment variables, separated from the
    /// field path by `__`, e.g. `GATEHOUSE__AUTH__JWT_SECRET`.
    pub const CONFIG_PREFIX: &str = "GATEHOUSE";
    pub const CONFIG_SEPARATOR: &str = "__";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const CLIENT_URL: &str = "http://localhost:5173";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
