//! Desktop light/dark preference via the XDG desktop portal.
//!
//! `org.freedesktop.portal.Settings` exposes
//! `org.freedesktop.appearance color-scheme` as a `u32`:
//! `0` = no preference, `1` = prefer dark, `2` = prefer light.

use futures::StreamExt;
use statdash_core::{ColorScheme, DashError, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use zbus::proxy::SignalStream;
use zbus::zvariant::{OwnedValue, Value};

const PORTAL_DEST: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const SETTINGS_IFACE: &str = "org.freedesktop.portal.Settings";
const APPEARANCE_NS: &str = "org.freedesktop.appearance";
const COLOR_SCHEME_KEY: &str = "color-scheme";
const SETTING_CHANGED: &str = "SettingChanged";

async fn session() -> Result<zbus::Connection> {
    zbus::Connection::session()
        .await
        .map_err(|e| DashError::Theme(format!("session bus: {e}")))
}

async fn read_color_scheme(conn: &zbus::Connection) -> Result<ColorScheme> {
    // `ReadOne` (portal v2) returns the value directly; older portals only
    // offer `Read`, which wraps it in an extra variant.
    let raw = match read_setting(conn, "ReadOne").await {
        Ok(v) => v,
        Err(_) => read_setting(conn, "Read").await?,
    };

    let code = portal_u32(&raw)
        .ok_or_else(|| DashError::Theme(format!("unexpected color-scheme value: {raw:?}")))?;
    Ok(scheme_from_portal(code))
}

async fn read_setting(conn: &zbus::Connection, method: &str) -> Result<OwnedValue> {
    let reply = conn
        .call_method(
            Some(PORTAL_DEST),
            PORTAL_PATH,
            Some(SETTINGS_IFACE),
            method,
            &(APPEARANCE_NS, COLOR_SCHEME_KEY),
        )
        .await
        .map_err(|e| DashError::Theme(format!("portal {method}: {e}")))?;

    reply
        .body()
        .deserialize::<OwnedValue>()
        .map_err(|e| DashError::Theme(format!("portal {method} reply: {e}")))
}

async fn subscribe(conn: &zbus::Connection) -> Result<SignalStream<'static>> {
    let proxy = zbus::Proxy::new(conn, PORTAL_DEST, PORTAL_PATH, SETTINGS_IFACE)
        .await
        .map_err(|e| DashError::Theme(format!("portal proxy: {e}")))?;
    proxy
        .receive_signal(SETTING_CHANGED)
        .await
        .map_err(|e| DashError::Theme(format!("subscribe {SETTING_CHANGED}: {e}")))
}

/// Unwrap nested variants down to the `u32` payload.
fn portal_u32(value: &Value<'_>) -> Option<u32> {
    match value {
        Value::U32(code) => Some(*code),
        Value::Value(inner) => portal_u32(inner),
        _ => None,
    }
}

fn scheme_from_portal(code: u32) -> ColorScheme {
    if code == 1 {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

/// Colour scheme carried by a `SettingChanged(namespace, key, value)`
/// signal; `None` for every other setting.
fn scheme_from_signal(namespace: &str, key: &str, value: &Value<'_>) -> Option<ColorScheme> {
    if namespace != APPEARANCE_NS || key != COLOR_SCHEME_KEY {
        return None;
    }
    portal_u32(value).map(scheme_from_portal)
}

/// Forward `scheme` unless it repeats the last one sent.  `false` once the
/// receiver is gone.
async fn forward(tx: &mpsc::Sender<ColorScheme>, last: &mut Option<ColorScheme>, scheme: ColorScheme) -> bool {
    if *last == Some(scheme) {
        return true;
    }
    info!(?scheme, "Desktop color scheme detected");
    *last = Some(scheme);
    tx.send(scheme).await.is_ok()
}

/// Spawn a background Tokio task that reports the desktop colour scheme and
/// every later change to it.
///
/// One session-bus connection is held for the task's lifetime.  The current
/// value is read once, then the portal's `SettingChanged` signal drives
/// updates.  If the signal cannot be subscribed, the value is re-read every
/// `fallback_interval` instead.  Without a session bus nothing is sent and
/// the dashboard stays on its light default.  The task stops when the
/// receiver is dropped.
pub fn spawn_scheme_watcher(fallback_interval: Duration) -> mpsc::Receiver<ColorScheme> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let conn = match session().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Desktop color scheme unavailable, assuming light: {e}");
                return;
            }
        };

        let mut last: Option<ColorScheme> = None;
        match read_color_scheme(&conn).await {
            Ok(scheme) => {
                if !forward(&tx, &mut last, scheme).await {
                    return;
                }
            }
            Err(e) => warn!("Desktop color scheme unavailable, assuming light: {e}"),
        }

        match subscribe(&conn).await {
            Ok(mut changes) => loop {
                tokio::select! {
                    _ = tx.closed() => return,
                    signal = changes.next() => {
                        let Some(signal) = signal else {
                            warn!("Portal stopped sending setting changes; polling instead");
                            break;
                        };
                        let body = signal.body();
                        let Ok((namespace, key, value)) = body.deserialize::<(String, String, OwnedValue)>() else {
                            debug!("Ignoring malformed {SETTING_CHANGED} signal");
                            continue;
                        };
                        if let Some(scheme) = scheme_from_signal(&namespace, &key, &value) {
                            if !forward(&tx, &mut last, scheme).await {
                                return;
                            }
                        }
                    }
                }
            },
            Err(e) => warn!("Cannot follow color scheme changes, polling instead: {e}"),
        }

        while !tx.is_closed() {
            tokio::time::sleep(fallback_interval).await;
            match read_color_scheme(&conn).await {
                Ok(scheme) => {
                    if !forward(&tx, &mut last, scheme).await {
                        break;
                    }
                }
                Err(e) => debug!("Color scheme read failed: {e}"),
            }
        }
    });

    rx
}
