/// Disposition of a Bedrock client's declared protocol version against the
/// set this adapter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    Accepted,
    ClientOutdated,
    ServerOutdated,
}

/// The sorted set of Bedrock wire-codec versions this adapter can speak.
/// Supported versions must stay sorted and non-empty; the oldest and newest
/// entries define the acceptance bounds used at handshake time.
pub const SUPPORTED_VERSIONS: &[i32] = &[622, 649, 671, 686];

pub fn check_version(protocol_version: i32) -> VersionCheck {
    let min = *SUPPORTED_VERSIONS.first().expect("non-empty version set");
    let max = *SUPPORTED_VERSIONS.last().expect("non-empty version set");

    if protocol_version < min {
        VersionCheck::ClientOutdated
    } else if protocol_version > max {
        VersionCheck::ServerOutdated
    } else {
        VersionCheck::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_minimum_is_client_outdated() {
        assert_eq!(check_version(1), VersionCheck::ClientOutdated);
    }

    #[test]
    fn above_maximum_is_server_outdated() {
        assert_eq!(check_version(9999), VersionCheck::ServerOutdated);
    }

    #[test]
    fn a_supported_version_is_accepted() {
        assert_eq!(check_version(686), VersionCheck::Accepted);
    }
}
