//! Response codes reported by the SonicWall appliance
//!
//! The appliance reports the outcome of an LHM authorization callback as a
//! numeric string. The same codes also arrive in the `cc` query parameter when
//! the appliance sends the user back to the portal after a failure.

/// Response code the appliance returns when the session was authorized
pub const SUCCESS: &str = "50";

/// Message shown for any failure without a specific entry in the table
pub const GENERIC_ERROR: &str = "An unexpected error has occurred.";

const ERROR_CODES: &[(&str, &str)] = &[
    (
        "2",
        "Your LHM session has expired. You may try to initiate a new session.",
    ),
    (
        "3",
        "You have exceeded your idle timeout. Please log back in.",
    ),
    (
        "4",
        "The maximum number of sessions has been reached. Please try again later.",
    ),
    (
        "51",
        "Session Limit Reached: The maximum number of guest session has been reached. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
    (
        "100",
        "Session creation failed: Your session cannot be created at this time. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
    (
        "251",
        "Session creation failed: The request for authorization failed message authentication. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
    (
        "253",
        "Session creation failed: The request for authorization failed to match a known session identity. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
    (
        "254",
        "Session creation failed: The request for authorization was missing an essential parameter. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
    (
        "255",
        "Session creation failed: The request for authorization failed due to an unspecified error. Sorry for the inconvenience. Please close and relaunch your browser to try again.",
    ),
];

/// Look up the message for a known code
pub fn lookup(code: &str) -> Option<&'static str> {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Message for a code, falling back to [`GENERIC_ERROR`] for unknown codes
pub fn message_for(code: &str) -> &'static str {
    lookup(code).unwrap_or(GENERIC_ERROR)
}

/// All codes with a specific message, in table order
#[cfg(test)]
pub fn known_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    ERROR_CODES.iter().copied()
}
