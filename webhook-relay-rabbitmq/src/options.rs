/// Broker location and credentials for the relay's single connection.
#[derive(Clone)]
pub struct AmqpOptions {
    pub login: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Used verbatim as the URI path segment; `%2f` selects the default vhost.
    pub vhost: String,
    /// When set, the channel is put in confirm mode and every publish waits for the broker ACK/NACK.
    pub confirms: bool,
}

impl AmqpOptions {
    pub fn uri(&self) -> String {
        self.build_uri(&self.password)
    }

    /// Same as [`uri`](Self::uri) with the password masked, for logs.
    pub fn redacted_uri(&self) -> String {
        self.build_uri("***")
    }

    fn build_uri(&self, password: &str) -> String {
        format!(
            "amqp://{}:{}@{}:{}/{}",
            self.login, password, self.host, self.port, self.vhost
        )
    }
}

impl std::fmt::Debug for AmqpOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmqpOptions")
            .field("login", &self.login)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("vhost", &self.vhost)
            .field("confirms", &self.confirms)
            .finish()
    }
}
