// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The two endpoint roles a handshake state machine can be parameterized
//! over.

/// Which side of the handshake this endpoint plays.
///
/// The state machine, the session's random/verify-data labels, and cipher
/// selection policy all branch on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    #[inline]
    pub fn is_client(self) -> bool {
        matches!(self, Role::Client)
    }

    #[inline]
    pub fn is_server(self) -> bool {
        matches!(self, Role::Server)
    }

    #[inline]
    pub fn peer(self) -> Role {
        match self {
            Role::Client => Role::Server,
            Role::Server => Role::Client,
        }
    }

    /// The PRF label this role uses when *sending* a Finished message.
    #[inline]
    pub fn finished_label(self) -> &'static [u8] {
        match self {
            Role::Client => b"client finished",
            Role::Server => b"server finished",
        }
    }
}
