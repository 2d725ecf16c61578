//! Retry bookkeeping for the refresh-and-retry protocol.

use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which response statuses count as "the access token was rejected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    /// Only 401 Unauthorized. 403 is left to the caller as a permission failure.
    #[default]
    Unauthorized,
    /// Both 401 Unauthorized and 403 Forbidden.
    UnauthorizedOrForbidden,
}

impl RefreshTrigger {
    pub fn triggers_refresh(self, status: StatusCode) -> bool {
        match self {
            Self::Unauthorized => status == StatusCode::UNAUTHORIZED,
            Self::UnauthorizedOrForbidden => {
                status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
            }
        }
    }
}

/// Where a single logical request is in its lifecycle.
///
/// A request starts `Initial`; after one refresh it becomes `Retried` and is
/// never refreshed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Initial,
    Retried,
}

/// What to do with a response to the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Hand the response to the caller unchanged.
    Deliver,
    /// Refresh the access token, then dispatch the request again.
    RefreshAndRetry,
    /// The retried request was rejected again.
    GiveUp,
}

impl RetryState {
    pub fn next(self, trigger: RefreshTrigger, status: StatusCode) -> Next {
        if !trigger.triggers_refresh(status) {
            return Next::Deliver;
        }
        match self {
            Self::Initial => Next::RefreshAndRetry,
            Self::Retried => Next::GiveUp,
        }
    }

    pub fn retried(self) -> Self {
        Self::Retried
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized_401(RefreshTrigger::Unauthorized, StatusCode::UNAUTHORIZED, true)]
    #[case::unauthorized_403(RefreshTrigger::Unauthorized, StatusCode::FORBIDDEN, false)]
    #[case::unauthorized_200(RefreshTrigger::Unauthorized, StatusCode::OK, false)]
    #[case::both_401(RefreshTrigger::UnauthorizedOrForbidden, StatusCode::UNAUTHORIZED, true)]
    #[case::both_403(RefreshTrigger::UnauthorizedOrForbidden, StatusCode::FORBIDDEN, true)]
    #[case::both_500(
        RefreshTrigger::UnauthorizedOrForbidden,
        StatusCode::INTERNAL_SERVER_ERROR,
        false
    )]
    fn test_triggers_refresh(
        #[case] trigger: RefreshTrigger,
        #[case] status: StatusCode,
        #[case] expected: bool,
    ) {
        assert_eq!(trigger.triggers_refresh(status), expected);
    }

    #[rstest]
    #[case::initial_ok(RetryState::Initial, StatusCode::OK, Next::Deliver)]
    #[case::initial_not_found(RetryState::Initial, StatusCode::NOT_FOUND, Next::Deliver)]
    #[case::initial_unauthorized(RetryState::Initial, StatusCode::UNAUTHORIZED, Next::RefreshAndRetry)]
    #[case::retried_ok(RetryState::Retried, StatusCode::OK, Next::Deliver)]
    #[case::retried_server_error(RetryState::Retried, StatusCode::BAD_GATEWAY, Next::Deliver)]
    #[case::retried_unauthorized(RetryState::Retried, StatusCode::UNAUTHORIZED, Next::GiveUp)]
    fn test_next(#[case] state: RetryState, #[case] status: StatusCode, #[case] expected: Next) {
        assert_eq!(state.next(RefreshTrigger::Unauthorized, status), expected);
    }

    #[test]
    fn retried_is_terminal() {
        assert_eq!(RetryState::Initial.retried(), RetryState::Retried);
        assert_eq!(RetryState::Retried.retried(), RetryState::Retried);
    }

    #[test]
    fn refresh_trigger_deserializes_snake_case() {
        let trigger: RefreshTrigger =
            serde_yaml::from_str("unauthorized_or_forbidden").unwrap();
        assert_eq!(trigger, RefreshTrigger::UnauthorizedOrForbidden);
    }
}
