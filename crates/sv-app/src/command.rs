//! Actuator commands and the control-system switch lock-out.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use sv_config::DisplayDef;
use sv_core::Timestamp;

use crate::error::{AppError, AppResult};
use crate::source::CommandSink;

/// A command addressed to an actuator entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    pub system: String,
    pub entity_id: String,
    pub entity_type: String,
    pub command_name: String,
    pub value: String,
}

/// Body the broker expects for a command attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBody<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: &'a str,
}

impl ActuatorCommand {
    pub fn body(&self) -> CommandBody<'_> {
        CommandBody {
            kind: "command",
            value: &self.value,
        }
    }

    pub fn service_path(&self) -> String {
        format!("/{}", self.system)
    }
}

/// Deliver `command`, logging failures instead of returning them.
///
/// Returns `true` if the sink accepted the command.
pub fn send_command<C>(sink: &C, command: &ActuatorCommand) -> bool
where
    C: CommandSink + ?Sized,
{
    match sink.post_command(command) {
        Ok(()) => {
            tracing::info!(
                entity = %command.entity_id,
                command = %command.command_name,
                value = %command.value,
                "command sent"
            );
            true
        }
        Err(err) => {
            tracing::warn!(entity = %command.entity_id, %err, "command failed");
            false
        }
    }
}

/// Blocks further control-system switches for a fixed time after one.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchLock {
    timeout: TimeDelta,
    locked_until: Option<Timestamp>,
}

impl SwitchLock {
    pub fn new(timeout_s: u64) -> AppResult<Self> {
        let timeout = i64::try_from(timeout_s)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| AppError::InvalidInput(format!("switch timeout {timeout_s} s out of range")))?;
        Ok(Self {
            timeout,
            locked_until: None,
        })
    }

    /// Lock-out configured by `display.switch_timeout_s`.
    pub fn from_config(display: &DisplayDef) -> AppResult<Self> {
        Self::new(display.switch_timeout_s)
    }

    pub fn is_locked(&self, now: Timestamp) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Take the lock if free. Returns `false` while a previous switch is
    /// still within its timeout.
    pub fn try_acquire(&mut self, now: Timestamp) -> bool {
        if self.is_locked(now) {
            return false;
        }
        // saturate at the far end of the calendar
        self.locked_until = Some(now.checked_add_signed(self.timeout).unwrap_or(Timestamp::MAX_UTC));
        true
    }

    /// Time until the lock releases.
    pub fn remaining(&self, now: Timestamp) -> TimeDelta {
        self.locked_until
            .map(|until| (until - now).max(TimeDelta::zero()))
            .unwrap_or_else(TimeDelta::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<ActuatorCommand>>,
        fail: bool,
    }

    impl CommandSink for RecordingSink {
        fn post_command(&self, command: &ActuatorCommand) -> Result<(), SourceError> {
            if self.fail {
                return Err(SourceError::Unavailable("broker".to_string()));
            }
            self.sent.lock().unwrap().push(command.clone());
            Ok(())
        }
    }

    fn valve_command() -> ActuatorCommand {
        ActuatorCommand {
            system: "plc".to_string(),
            entity_id: "actuator:Three_Way_Valve_PLC".to_string(),
            entity_type: "actuator:Valve".to_string(),
            command_name: "setpoint".to_string(),
            value: "40".to_string(),
        }
    }

    fn t(s: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2021, 1, 2, 8, 0, 0).unwrap() + TimeDelta::seconds(s)
    }

    #[test]
    fn body_matches_broker_format() {
        let cmd = valve_command();
        let json = serde_json::to_value(cmd.body()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "command", "value": "40"}));
        assert_eq!(cmd.service_path(), "/plc");
    }

    #[test]
    fn send_reports_delivery() {
        let sink = RecordingSink::default();
        assert!(send_command(&sink, &valve_command()));
        assert_eq!(sink.sent.lock().unwrap().len(), 1);

        let failing = RecordingSink {
            fail: true,
            ..Default::default()
        };
        assert!(!send_command(&failing, &valve_command()));
    }

    #[test]
    fn switch_lock_holds_for_timeout() {
        let mut lock = SwitchLock::new(30).unwrap();
        assert!(lock.try_acquire(t(0)));
        assert!(lock.is_locked(t(29)));
        assert!(!lock.try_acquire(t(10)));
        assert_eq!(lock.remaining(t(10)), TimeDelta::seconds(20));
        assert!(lock.try_acquire(t(30)));
        assert_eq!(lock.remaining(t(100)), TimeDelta::zero());
    }

    #[test]
    fn lock_timeout_comes_from_display_config() {
        let display = DisplayDef {
            switch_timeout_s: 5,
            ..DisplayDef::default()
        };
        let mut lock = SwitchLock::from_config(&display).unwrap();
        assert!(lock.try_acquire(t(0)));
        assert!(lock.is_locked(t(4)));
        assert!(!lock.is_locked(t(5)));
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        assert!(matches!(SwitchLock::new(u64::MAX), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            SwitchLock::new(i64::MAX as u64),
            Err(AppError::InvalidInput(_))
        ));

        let mut lock = SwitchLock::new(9_000_000_000_000).unwrap();
        assert!(lock.try_acquire(t(0)));
        assert!(lock.is_locked(t(1_000_000)));
    }
}
