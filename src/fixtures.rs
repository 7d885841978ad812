#[cfg(test)]
pub mod test {
    use std::cell::RefCell;

    use tracing::Level;

    use crate::database::{DatabaseDescriptor, Driver};
    use crate::sink::LogSink;

    /// Sink that keeps every message for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        entries: RefCell<Vec<(Level, String)>>,
    }

    impl RecordingSink {
        pub fn entries(&self) -> Vec<(Level, String)> {
            self.entries.borrow().clone()
        }

        pub fn messages(&self) -> Vec<String> {
            self.entries
                .borrow()
                .iter()
                .map(|(_, message)| message.clone())
                .collect()
        }
    }

    impl LogSink for RecordingSink {
        fn log(&self, level: Level, message: &str) {
            self.entries.borrow_mut().push((level, message.to_string()));
        }
    }

    pub fn sample_database(driver: Driver) -> DatabaseDescriptor {
        DatabaseDescriptor::new("db.internal", "5432", "orders", "svc", "s3cret").with_driver(driver)
    }

    // -- Profile fixtures --------------------------------------------------------

    pub const FULL_PROFILE: &str = r#"
port = "8080"
ssl_port = "8443"
context_path = "api"
target = "out/application.yml"
merge = "deep"

[database]
enabled = true
host = "10.0.0.5"
port = "3306"
name = "shop"
username = "root"
password = "pw"
driver = "postgresql"
show_sql = true

[logging]
mode = "custom"
root = "WARN"
path = "var/log/shop"
"#;
}
