//! Wait-guarded interaction primitives.
//!
//! Each primitive polls the live DOM until its readiness condition holds,
//! then acts. One bounded timeout per wait, no backoff, no retries — a single
//! expiry is terminal for the step and propagates to the runner.

use crate::locator::Locator;
use crate::result::{EnsaioError, EnsaioResult};
use crate::session::Session;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default timeout for wait-guarded operations (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Polling interval between DOM probes (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

const POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

#[allow(clippy::cast_possible_truncation)]
const fn ms(timeout: Duration) -> u64 {
    timeout.as_millis() as u64
}

/// Poll until the element is present, visible, and enabled, then click it.
///
/// A zero timeout resolves immediately without polling. The click is never
/// dispatched once the wait has expired.
///
/// # Errors
///
/// `ElementNotInteractable` if the timeout elapses first; driver faults
/// propagate as-is.
pub async fn click_when_ready<S: Session + ?Sized>(
    session: &mut S,
    locator: &Locator,
    timeout: Duration,
) -> EnsaioResult<()> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Some(state) = session.probe(locator).await? {
            if state.interactable() {
                debug!(%locator, "clicking");
                return session.click(locator).await;
            }
            trace!(%locator, ?state, "not yet interactable");
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(EnsaioError::ElementNotInteractable {
        locator: locator.to_string(),
        ms: ms(timeout),
    })
}

/// Poll until the element is visible, then clear it and type `text` as
/// discrete keystrokes.
///
/// Text goes in one key event per character so that masked fields (phone
/// numbers, postal codes) see each keystroke and apply their client-side
/// formatting; a bulk value-set would not trigger it.
///
/// # Errors
///
/// `ElementNotFound` if the timeout elapses before the element is visible.
pub async fn fill_when_visible<S: Session + ?Sized>(
    session: &mut S,
    locator: &Locator,
    text: &str,
    timeout: Duration,
) -> EnsaioResult<()> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Some(state) = session.probe(locator).await? {
            if state.visible {
                debug!(%locator, chars = text.chars().count(), "filling");
                session.focus(locator).await?;
                session.clear(locator).await?;
                for ch in text.chars() {
                    session.press_key(ch).await?;
                }
                return Ok(());
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(EnsaioError::ElementNotFound {
        locator: locator.to_string(),
        ms: ms(timeout),
    })
}

/// Open a disclosure widget and select one of its options.
///
/// Two independent wait-guarded clicks: the option is not expected to exist
/// before the trigger's click has been processed and the popup has rendered,
/// so the second wait starts fresh after the first click lands.
///
/// # Errors
///
/// `ElementNotInteractable` from whichever phase times out first.
pub async fn select_from_popup_menu<S: Session + ?Sized>(
    session: &mut S,
    trigger: &Locator,
    option: &Locator,
    timeout: Duration,
) -> EnsaioResult<()> {
    click_when_ready(session, trigger, timeout).await?;
    click_when_ready(session, option, timeout).await
}

/// Poll until the element's text content contains `expected`.
///
/// Backs the scenario-level success assertion.
///
/// # Errors
///
/// `Timeout` if the text never appears within the wait.
pub async fn wait_for_text<S: Session + ?Sized>(
    session: &mut S,
    locator: &Locator,
    expected: &str,
    timeout: Duration,
) -> EnsaioResult<()> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Some(text) = session.text_of(locator).await? {
            if text.contains(expected) {
                debug!(%locator, expected, "text present");
                return Ok(());
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(EnsaioError::Timeout { ms: ms(timeout) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FakeElement, FakeSession};

    const TIMEOUT: Duration = Duration::from_millis(500);

    mod click_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_ready_element() {
            let mut session = FakeSession::new().with_element(FakeElement::new("#save"));
            click_when_ready(&mut session, &Locator::css("#save"), TIMEOUT)
                .await
                .unwrap();
            assert_eq!(session.clicks, vec!["#save"]);
        }

        #[tokio::test]
        async fn test_click_never_clickable_times_out_without_click() {
            let mut session =
                FakeSession::new().with_element(FakeElement::new("#save").disabled());
            let err = click_when_ready(&mut session, &Locator::css("#save"), TIMEOUT)
                .await
                .unwrap_err();
            assert!(matches!(err, EnsaioError::ElementNotInteractable { .. }));
            assert!(session.clicks.is_empty());
        }

        #[tokio::test]
        async fn test_click_absent_element_times_out() {
            let mut session = FakeSession::new();
            let err = click_when_ready(&mut session, &Locator::css("#ghost"), TIMEOUT)
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(session.clicks.is_empty());
        }

        #[tokio::test]
        async fn test_zero_timeout_resolves_immediately() {
            // Element is ready, but a zero timeout must not even poll
            let mut session = FakeSession::new().with_element(FakeElement::new("#save"));
            let start = Instant::now();
            let err = click_when_ready(&mut session, &Locator::css("#save"), Duration::ZERO)
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(start.elapsed() < Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
            assert!(session.clicks.is_empty());
        }

        #[tokio::test]
        async fn test_click_fault_propagates() {
            let mut session = FakeSession::new()
                .with_element(FakeElement::new("#broken"))
                .with_click_fault("#broken");
            let err = click_when_ready(&mut session, &Locator::css("#broken"), TIMEOUT)
                .await
                .unwrap_err();
            assert!(matches!(err, EnsaioError::Driver { .. }));
        }
    }

    mod fill_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_delivers_ordered_keystrokes() {
            let mut session = FakeSession::new().with_element(FakeElement::new("#code"));
            fill_when_visible(&mut session, &Locator::css("#code"), "12345", TIMEOUT)
                .await
                .unwrap();
            assert_eq!(session.cleared, vec!["#code"]);
            assert_eq!(session.keys.iter().collect::<String>(), "12345");
        }

        #[tokio::test]
        async fn test_fill_waits_for_delayed_visibility() {
            let mut session = FakeSession::new().with_element(
                FakeElement::new("#phone").visible_after(Duration::from_millis(120)),
            );
            session.navigate("http://app").await.unwrap();
            fill_when_visible(&mut session, &Locator::css("#phone"), "61999998888", TIMEOUT)
                .await
                .unwrap();
            assert_eq!(session.keys.iter().collect::<String>(), "61999998888");
        }

        #[tokio::test]
        async fn test_fill_timeout_is_element_not_found() {
            let mut session = FakeSession::new();
            let err = fill_when_visible(&mut session, &Locator::css("#ghost"), "x", TIMEOUT)
                .await
                .unwrap_err();
            assert!(matches!(err, EnsaioError::ElementNotFound { .. }));
            assert!(session.keys.is_empty());
        }

        #[tokio::test]
        async fn test_fill_zero_timeout() {
            let mut session = FakeSession::new().with_element(FakeElement::new("#code"));
            let err =
                fill_when_visible(&mut session, &Locator::css("#code"), "1", Duration::ZERO)
                    .await
                    .unwrap_err();
            assert!(err.is_timeout());
        }
    }

    mod popup_tests {
        use super::*;

        #[tokio::test]
        async fn test_select_tolerates_option_absent_before_trigger() {
            // The option only exists once the trigger has been clicked
            let mut session = FakeSession::new()
                .with_element(FakeElement::new("#buyer-trigger"))
                .with_element(FakeElement::new("#buyer-option").revealed_by("#buyer-trigger"));

            select_from_popup_menu(
                &mut session,
                &Locator::css("#buyer-trigger"),
                &Locator::css("#buyer-option"),
                TIMEOUT,
            )
            .await
            .unwrap();
            assert_eq!(session.clicks, vec!["#buyer-trigger", "#buyer-option"]);
        }

        #[tokio::test]
        async fn test_select_times_out_when_option_never_appears() {
            let mut session = FakeSession::new().with_element(FakeElement::new("#trigger"));
            let err = select_from_popup_menu(
                &mut session,
                &Locator::css("#trigger"),
                &Locator::css("#never"),
                TIMEOUT,
            )
            .await
            .unwrap_err();
            assert!(err.is_timeout());
            // The trigger click itself went through
            assert_eq!(session.clicks, vec!["#trigger"]);
        }
    }

    mod text_tests {
        use super::*;

        #[tokio::test]
        async fn test_wait_for_text_substring_match() {
            let mut session = FakeSession::new().with_element(
                FakeElement::new("#alert").with_text("Ok: Cliente cadastrado com sucesso!"),
            );
            wait_for_text(
                &mut session,
                &Locator::css("#alert"),
                "Cliente cadastrado com sucesso",
                TIMEOUT,
            )
            .await
            .unwrap();
        }

        #[tokio::test]
        async fn test_wait_for_text_timeout() {
            let mut session =
                FakeSession::new().with_element(FakeElement::new("#alert").with_text("Erro"));
            let err = wait_for_text(&mut session, &Locator::css("#alert"), "sucesso", TIMEOUT)
                .await
                .unwrap_err();
            assert!(matches!(err, EnsaioError::Timeout { .. }));
        }
    }
}
