//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use cdn_refresh_provider::{AccessCredentials, AliyunProvider, ProviderKind};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 真实账号测试上下文
pub struct TestContext {
    pub credentials: AccessCredentials,
    /// 要刷新的路径，如 `https://static.example.com/`
    pub path: String,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let access_key_id = env::var("ALIYUN_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIYUN_ACCESS_KEY_SECRET").ok()?;
        let path = env::var("TEST_REFRESH_PATH").ok()?;

        Some(Self {
            credentials: AccessCredentials::new(access_key_id, access_key_secret),
            path,
        })
    }
}

/// 预置响应
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn to_http(&self) -> String {
        let reason = match self.status {
            200 => "OK",
            400 => "Bad Request",
            403 => "Forbidden",
            429 => "Too Many Requests",
            503 => "Service Unavailable",
            _ => "Unknown",
        };
        format!(
            "HTTP/1.1 {} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            self.body.len(),
            self.body
        )
    }
}

/// 本地模拟 OpenAPI 服务：按顺序返回预置响应，并记录收到的原始请求头
pub struct MockOpenApi {
    pub endpoint: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockOpenApi {
    pub async fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            for response in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };

                let mut raw = Vec::new();
                let mut buf = [0_u8; 4096];
                loop {
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                    if raw.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                recorded
                    .lock()
                    .await
                    .push(String::from_utf8_lossy(&raw).into_owned());

                let _ = socket.write_all(response.to_http().as_bytes()).await;
                let _ = socket.flush().await;
            }
        });

        Self {
            endpoint: format!("http://{addr}"),
            requests,
        }
    }

    pub fn provider(&self, kind: ProviderKind, max_retries: u32) -> AliyunProvider {
        AliyunProvider::builder(kind)
            .endpoint(&self.endpoint)
            .max_retries(max_retries)
            .build()
            .unwrap()
    }

    pub async fn recorded(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

/// 从原始请求中取出请求头的值（不区分大小写）
pub fn header_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}

/// 请求行，如 `POST /?Force=true&... HTTP/1.1`
pub fn request_line(raw: &str) -> &str {
    raw.lines().next().unwrap_or_default()
}
