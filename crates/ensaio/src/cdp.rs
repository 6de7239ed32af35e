//! Real browser session over the Chrome `DevTools` Protocol.
//!
//! Available with the `browser` feature. Element resolution is
//! evaluation-based: locators compile to JavaScript probes executed in the
//! page, so CSS and XPath strategies go through one code path. Keystrokes are
//! dispatched through the CDP `Input` domain so masked fields see real key
//! events.

use crate::locator::Locator;
use crate::result::{EnsaioError, EnsaioResult};
use crate::session::{ElementState, Session, SessionConfig};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;

/// A live chromium session under CDP control.
///
/// Launch with [`CdpSession::launch`]; the scenario runner closes it. Close
/// is idempotent so a caller bailing out early cannot double-free the
/// browser.
#[derive(Debug)]
pub struct CdpSession {
    browser: Browser,
    page: Page,
    handler: tokio::task::JoinHandle<()>,
    closed: bool,
}

impl CdpSession {
    /// Launch a browser and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns `BrowserLaunch` if chromium cannot be started.
    pub async fn launch(config: &SessionConfig) -> EnsaioResult<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|e| EnsaioError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            Browser::launch(cdp_config)
                .await
                .map_err(|e| EnsaioError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Drive the CDP event stream until the connection drops
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EnsaioError::driver(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            handler: handle,
            closed: false,
        })
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> EnsaioResult<T> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| EnsaioError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| EnsaioError::driver(e.to_string()))
    }
}

#[async_trait]
impl Session for CdpSession {
    async fn navigate(&mut self, url: &str) -> EnsaioResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| EnsaioError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn probe(&self, locator: &Locator) -> EnsaioResult<Option<ElementState>> {
        let expr = format!(
            "(() => {{ \
               const el = {query}; \
               if (!el) return null; \
               const style = window.getComputedStyle(el); \
               const rect = el.getBoundingClientRect(); \
               const visible = style.visibility !== 'hidden' \
                 && style.display !== 'none' \
                 && rect.width > 0 && rect.height > 0; \
               return {{ visible, enabled: !el.disabled }}; \
             }})()",
            query = locator.to_query()
        );
        self.eval(expr).await
    }

    async fn click(&mut self, locator: &Locator) -> EnsaioResult<()> {
        let expr = format!(
            "(() => {{ \
               const el = {query}; \
               if (!el) return false; \
               el.scrollIntoView({{ block: 'center' }}); \
               el.click(); \
               return true; \
             }})()",
            query = locator.to_query()
        );
        let clicked: bool = self.eval(expr).await?;
        if clicked {
            Ok(())
        } else {
            // The element was probed just before; it vanished mid-action
            Err(EnsaioError::driver(format!(
                "{locator} vanished before click"
            )))
        }
    }

    async fn focus(&mut self, locator: &Locator) -> EnsaioResult<()> {
        let expr = format!(
            "(() => {{ const el = {query}; if (el) el.focus(); return !!el; }})()",
            query = locator.to_query()
        );
        let focused: bool = self.eval(expr).await?;
        if focused {
            Ok(())
        } else {
            Err(EnsaioError::driver(format!(
                "{locator} vanished before focus"
            )))
        }
    }

    async fn clear(&mut self, locator: &Locator) -> EnsaioResult<()> {
        // Clearing must also notify the framework, or controlled inputs
        // resurrect the old value on the next render
        let expr = format!(
            "(() => {{ \
               const el = {query}; \
               if (!el) return false; \
               el.value = ''; \
               el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
               return true; \
             }})()",
            query = locator.to_query()
        );
        let cleared: bool = self.eval(expr).await?;
        if cleared {
            Ok(())
        } else {
            Err(EnsaioError::driver(format!(
                "{locator} vanished before clear"
            )))
        }
    }

    async fn press_key(&mut self, ch: char) -> EnsaioResult<()> {
        let params = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::Char)
            .text(ch.to_string())
            .build()
            .map_err(|e| EnsaioError::driver(e.to_string()))?;
        self.page
            .execute(params)
            .await
            .map_err(|e| EnsaioError::driver(e.to_string()))?;
        Ok(())
    }

    async fn text_of(&self, locator: &Locator) -> EnsaioResult<Option<String>> {
        let expr = format!(
            "(() => {{ const el = {query}; return el ? el.textContent : null; }})()",
            query = locator.to_query()
        );
        self.eval(expr).await
    }

    async fn screenshot(&self) -> EnsaioResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let screenshot =
            self.page
                .execute(params)
                .await
                .map_err(|e| EnsaioError::Screenshot {
                    message: e.to_string(),
                })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| EnsaioError::Screenshot {
                message: e.to_string(),
            })
    }

    async fn close(&mut self) -> EnsaioResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.browser
            .close()
            .await
            .map_err(|e| EnsaioError::driver(e.to_string()))?;
        self.handler.abort();
        Ok(())
    }
}
