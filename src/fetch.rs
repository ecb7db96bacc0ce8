use crate::error::{Result, VastError};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a VAST request may take before it is abandoned
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Desktop browser identification, some ad servers refuse unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Google IMA single linear inline sample tag
pub const SAMPLE_VAST_URL: &str = "https://pubads.g.doubleclick.net/gampad/ads?sz=640x480&iu=/124319096/external/single_ad_samples&ciu_szs=300x250&impl=s&gdfp_req=1&env=vp&output=vast&unviewed_position_start=1&cust_params=deployment%3Ddevsite%26sample_ct%3Dlinear&correlator=";

/// Settings for fetching a VAST document over HTTP
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetch VAST content from a URL, a `file://` URL or a local path
pub async fn fetch_vast_content_async(url_or_path: &str, config: &FetchConfig) -> Result<String> {
    if let Some(path) = url_or_path.strip_prefix("file://") {
        #[cfg(target_os = "windows")]
        let path = path.trim_start_matches('/');

        let file_path = resolve_local_path(path);
        info!("Reading from file: {}", file_path.display());
        return Ok(tokio::fs::read_to_string(file_path).await?);
    }

    if Path::new(url_or_path).exists() {
        info!("Reading from local file: {}", url_or_path);
        return Ok(tokio::fs::read_to_string(url_or_path).await?);
    }

    fetch_vast_from_url(url_or_path, config).await
}

/// Resolve a `file://` path, falling back to the bundled `samples` directory
fn resolve_local_path(path: &str) -> PathBuf {
    let path_buf = PathBuf::from(path);
    if path_buf.exists() {
        return path_buf;
    }

    let samples_path = PathBuf::from("samples").join(path);
    if samples_path.exists() {
        samples_path
    } else {
        path_buf
    }
}

/// Fetch VAST XML from a URL
async fn fetch_vast_from_url(url: &str, config: &FetchConfig) -> Result<String> {
    // Random request ID to correlate log lines
    let req_id: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let url = url::Url::parse(url)?;

    info!("[{}] Fetching from URL: {}", req_id, url);
    let start_time = Instant::now();

    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| VastError::FetchError(format!("Failed to build HTTP client: {}", e)))?;

    let response = client.get(url.clone()).send().await.map_err(|e| {
        warn!("[{}] Request failed after {:?}", req_id, start_time.elapsed());
        describe_request_error(&e, config.timeout)
    })?;

    info!("[{}] Received response in {:?}", req_id, start_time.elapsed());

    let status = response.status();
    if !status.is_success() {
        warn!("[{}] Server answered {}", req_id, status);
        return Err(VastError::FetchError(format!(
            "HTTP status {} for url ({})",
            status, url
        )));
    }

    let xml_content = response
        .text()
        .await
        .map_err(|e| describe_request_error(&e, config.timeout))?;

    info!(
        "[{}] Total request completed in {:?} ({} bytes)",
        req_id,
        start_time.elapsed(),
        xml_content.len()
    );

    Ok(xml_content)
}

fn describe_request_error(error: &reqwest::Error, timeout: Duration) -> VastError {
    if error.is_timeout() {
        VastError::FetchError(format!(
            "Request timed out after {}s: {}",
            timeout.as_secs_f32(),
            error
        ))
    } else {
        VastError::FetchError(format!("Failed to fetch URL: {}", error))
    }
}
