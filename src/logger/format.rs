//! Access log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    #[must_use]
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    #[must_use]
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn request_uri(&self) -> String {
        self.query
            .as_ref()
            .map_or_else(|| self.path.clone(), |q| format!("{}?{}", self.path, q))
    }

    fn request_line(&self) -> String {
        format!(
            "{} {} HTTP/{}",
            self.method,
            self.request_uri(),
            self.http_version
        )
    }

    /// Apache/Nginx Combined Log Format
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$status`,
    /// `$body_bytes_sent`, `$http_referer`, `$http_user_agent`,
    /// `$request_time` (seconds, 3 decimal places).
    fn format_custom(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();

        result = result.replace("$remote_addr", &self.remote_addr);
        result = result.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        result = result.replace("$time_iso8601", &self.time.to_rfc3339());
        // Longer variables first so $request does not clobber $request_time
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;
        result = result.replace("$request_time", &format!("{request_time:.3}"));
        result = result.replace("$request_method", &self.method);
        result = result.replace("$request_uri", &self.request_uri());
        result = result.replace("$request", &self.request_line());
        result = result.replace("$status", &self.status.to_string());
        result = result.replace("$body_bytes_sent", &self.body_bytes.to_string());
        result = result.replace("$http_referer", self.referer.as_deref().unwrap_or("-"));
        result = result.replace(
            "$http_user_agent",
            self.user_agent.as_deref().unwrap_or("-"),
        );

        result
    }
}
