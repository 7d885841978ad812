//! Database descriptor and the `spring.datasource` / `spring.jpa` sections it
//! renders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::port::Port;
use crate::yaml::single_entry;

const MYSQL_DRIVER_CLASS: &str = "com.mysql.cj.jdbc.Driver";
const MYSQL_TIMEZONE: &str = "Asia/Jakarta";

/// JDBC driver family, selected by a loose tag.
///
/// Parsing never fails: `sqlserver` and `postgresql` select their families,
/// anything else falls back to [`Driver::MySql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Driver {
    #[default]
    MySql,
    SqlServer,
    PostgreSql,
}

impl Driver {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "sqlserver" => Driver::SqlServer,
            "postgresql" => Driver::PostgreSql,
            _ => Driver::MySql,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::SqlServer => "sqlserver",
            Driver::PostgreSql => "postgresql",
        }
    }
}

impl FromStr for Driver {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Driver::from_tag(s))
    }
}

impl From<String> for Driver {
    fn from(tag: String) -> Self {
        Driver::from_tag(&tag)
    }
}

impl From<Driver> for String {
    fn from(driver: Driver) -> Self {
        driver.tag().to_string()
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Connection and ORM settings for the server's database.
///
/// Credentials are passed through verbatim; nothing is escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseDescriptor {
    pub host: String,
    pub port: Port,
    pub name: String,
    pub username: String,
    pub password: String,
    pub driver: Driver,
    pub show_sql: bool,
    pub open_in_view: bool,
    pub format_sql: bool,
    pub ddl_auto: String,
}

impl DatabaseDescriptor {
    /// Descriptor with the MySQL driver and default ORM flags.
    pub fn new(
        host: impl Into<String>,
        port: impl Into<Port>,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            name: name.into(),
            username: username.into(),
            password: password.into(),
            driver: Driver::default(),
            show_sql: false,
            open_in_view: false,
            format_sql: true,
            ddl_auto: "update".to_string(),
        }
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    pub fn with_show_sql(mut self, show_sql: bool) -> Self {
        self.show_sql = show_sql;
        self
    }

    pub fn with_open_in_view(mut self, open_in_view: bool) -> Self {
        self.open_in_view = open_in_view;
        self
    }

    pub fn with_format_sql(mut self, format_sql: bool) -> Self {
        self.format_sql = format_sql;
        self
    }

    pub fn with_ddl_auto(mut self, ddl_auto: impl Into<String>) -> Self {
        self.ddl_auto = ddl_auto.into();
        self
    }

    /// JDBC connection URL for the selected driver.
    pub fn url(&self) -> String {
        let Self {
            host, port, name, ..
        } = self;
        match self.driver {
            Driver::SqlServer => format!(
                "jdbc:sqlserver://{host}:{port};databaseName={name};encrypt=true;trustServerCertificate=true;"
            ),
            Driver::PostgreSql => format!("jdbc:postgresql://{host}:{port}/{name}"),
            Driver::MySql => format!(
                "jdbc:mysql://{host}:{port}/{name}?createDatabaseIfNotExist=true&serverTimezone={MYSQL_TIMEZONE}"
            ),
        }
    }

    /// The `spring.datasource` section.
    pub fn datasource(&self) -> Mapping {
        let mut map = Mapping::new();
        if self.driver == Driver::MySql {
            map.insert("driver-class-name".into(), MYSQL_DRIVER_CLASS.into());
        }
        map.insert("url".into(), self.url().into());
        map.insert("username".into(), self.username.clone().into());
        map.insert("password".into(), self.password.clone().into());
        map
    }

    /// The `spring.jpa` section.
    pub fn jpa(&self) -> Mapping {
        let hibernate_props = single_entry("format_sql", self.format_sql);

        let mut map = Mapping::new();
        map.insert("open-in-view".into(), self.open_in_view.into());
        map.insert("show-sql".into(), self.show_sql.into());
        map.insert(
            "properties".into(),
            Value::Mapping(single_entry("hibernate", Value::Mapping(hibernate_props))),
        );
        map.insert(
            "hibernate".into(),
            Value::Mapping(single_entry("ddl-auto", self.ddl_auto.as_str())),
        );
        map
    }
}
