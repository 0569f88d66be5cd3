use crate::presentation::Presentation;
use anyhow::{Context as _, Result};
use std::{collections::HashMap, time::Duration};
use zbus::{Connection, proxy, zvariant::Value};

/// Let the notification server pick the expiration.
const EXPIRE_DEFAULT: i32 = -1;

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications",
    gen_blocking = false
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

pub(crate) trait Notifier {
    /// Shows `presentation`, replacing notification `replaces_id` if it is
    /// still on screen. Returns the id of the shown notification.
    async fn notify(
        &self,
        replaces_id: u32,
        presentation: &Presentation,
        level: u32,
    ) -> Result<u32>;
}

pub(crate) struct DBusNotifier {
    app_name: String,
    timeout: Duration,
}

impl DBusNotifier {
    pub(crate) fn new(app_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            timeout,
        }
    }

    async fn send(&self, replaces_id: u32, presentation: &Presentation, level: u32) -> Result<u32> {
        let connection = Connection::session()
            .await
            .context("failed to connect to session bus")?;
        let proxy = NotificationsProxy::new(&connection)
            .await
            .context("failed to create notifications proxy")?;

        let value = Value::from(i32::try_from(level).unwrap_or(i32::MAX));
        let hints = HashMap::from([("value", &value)]);

        let id = proxy
            .notify(
                &self.app_name,
                replaces_id,
                &presentation.icon,
                presentation.title,
                &presentation.body,
                &[],
                &hints,
                EXPIRE_DEFAULT,
            )
            .await
            .context("failed to send notification")?;

        Ok(id)
    }
}

impl Notifier for DBusNotifier {
    async fn notify(
        &self,
        replaces_id: u32,
        presentation: &Presentation,
        level: u32,
    ) -> Result<u32> {
        tokio::time::timeout(self.timeout, self.send(replaces_id, presentation, level))
            .await
            .with_context(|| format!("notification server did not answer in {:?}", self.timeout))?
    }
}
