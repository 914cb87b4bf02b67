// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The TLS alert taxonomy (RFC 5246 §7.2.2), plus the handful of errors
//! that cross a collaborator boundary rather than the wire.
//!
//! Every variant maps 1:1 onto an [`AlertDescription`] so `_error` (see
//! `state_machine`) always has a wire alert to emit before tearing the
//! connection down.

use s2n_codec::DecoderError;

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.2
//# enum { warning(1), fatal(2), (255) } AlertLevel;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Warning,
    Fatal,
}

impl AlertLevel {
    pub const fn as_u8(self) -> u8 {
        match self {
            AlertLevel::Warning => 1,
            AlertLevel::Fatal => 2,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(AlertLevel::Warning),
            2 => Some(AlertLevel::Fatal),
            _ => None,
        }
    }
}

//= https://www.rfc-editor.org/rfc/rfc5246#section-7.2
//# enum {
//#     close_notify(0),
//#     unexpected_message(10),
//#     bad_record_mac(20),
//#     decryption_failed_RESERVED(21),
//#     record_overflow(22),
//#     decompression_failure(30),
//#     handshake_failure(40),
//#     no_certificate_RESERVED(41),
//#     bad_certificate(42),
//#     unsupported_certificate(43),
//#     certificate_revoked(44),
//#     certificate_expired(45),
//#     certificate_unknown(46),
//#     illegal_parameter(47),
//#     unknown_ca(48),
//#     access_denied(49),
//#     decode_error(50),
//#     decrypt_error(51),
//#     export_restriction_RESERVED(60),
//#     protocol_version(70),
//#     insufficient_security(71),
//#     internal_error(80),
//#     user_canceled(90),
//#     no_renegotiation(100),
//#     (255)
//# } AlertDescription;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    CloseNotify = 0,
    UnexpectedMessage = 10,
    BadRecordMac = 20,
    RecordOverflow = 22,
    DecompressionFailure = 30,
    HandshakeFailure = 40,
    BadCertificate = 42,
    UnsupportedCertificate = 43,
    CertificateRevoked = 44,
    CertificateExpired = 45,
    CertificateUnknown = 46,
    IllegalParameter = 47,
    UnknownCa = 48,
    AccessDenied = 49,
    DecodeError = 50,
    DecryptError = 51,
    ProtocolVersion = 70,
    InsufficientSecurity = 71,
    InternalError = 80,
    UserCanceled = 90,
    NoRenegotiation = 100,
}

impl AlertDescription {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A fallible outcome anywhere in the record/handshake/session pipeline.
///
/// Every variant (other than the collaborator-boundary ones) corresponds
/// 1:1 with an [`AlertDescription`] via [`TlsError::description`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TlsError {
    #[error("unexpected message")]
    UnexpectedMessage,
    #[error("bad record mac")]
    BadRecordMac,
    #[error("record overflow")]
    RecordOverflow,
    #[error("decompression failure")]
    DecompressionFailure,
    #[error("handshake failure")]
    HandshakeFailure,
    #[error("bad certificate")]
    BadCertificate,
    #[error("unsupported certificate")]
    UnsupportedCertificate,
    #[error("certificate revoked")]
    CertificateRevoked,
    #[error("certificate expired")]
    CertificateExpired,
    #[error("certificate unknown")]
    CertificateUnknown,
    #[error("illegal parameter")]
    IllegalParameter,
    #[error("unknown certificate authority")]
    UnknownCa,
    #[error("access denied")]
    AccessDenied,
    #[error("decode error")]
    DecodeError,
    #[error("decrypt error")]
    DecryptError,
    #[error("protocol version mismatch")]
    ProtocolVersion,
    #[error("insufficient security")]
    InsufficientSecurity,
    #[error("internal error")]
    InternalError,
    /// A feature explicitly out of scope for this handshake core (§9 Open
    /// Questions): `certificate_verify`, client-certificate auth,
    /// renegotiation, DHE.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl TlsError {
    pub const fn description(self) -> AlertDescription {
        match self {
            TlsError::UnexpectedMessage => AlertDescription::UnexpectedMessage,
            TlsError::BadRecordMac => AlertDescription::BadRecordMac,
            TlsError::RecordOverflow => AlertDescription::RecordOverflow,
            TlsError::DecompressionFailure => AlertDescription::DecompressionFailure,
            TlsError::HandshakeFailure => AlertDescription::HandshakeFailure,
            TlsError::BadCertificate => AlertDescription::BadCertificate,
            TlsError::UnsupportedCertificate => AlertDescription::UnsupportedCertificate,
            TlsError::CertificateRevoked => AlertDescription::CertificateRevoked,
            TlsError::CertificateExpired => AlertDescription::CertificateExpired,
            TlsError::CertificateUnknown => AlertDescription::CertificateUnknown,
            TlsError::IllegalParameter => AlertDescription::IllegalParameter,
            TlsError::UnknownCa => AlertDescription::UnknownCa,
            TlsError::AccessDenied => AlertDescription::AccessDenied,
            TlsError::DecodeError => AlertDescription::DecodeError,
            TlsError::DecryptError => AlertDescription::DecryptError,
            TlsError::ProtocolVersion => AlertDescription::ProtocolVersion,
            TlsError::InsufficientSecurity => AlertDescription::InsufficientSecurity,
            TlsError::InternalError | TlsError::NotImplemented(_) => AlertDescription::InternalError,
        }
    }

    /// All errors raised by this crate are fatal; non-fatal (warning-level)
    /// alerts are handled directly by `state_machine::handle_alert` and
    /// never surface as a `TlsError`.
    pub const fn level(self) -> AlertLevel {
        AlertLevel::Fatal
    }

    /// The reverse of [`TlsError::description`], for a fatal alert received
    /// from the peer. `close_notify` and the reserved/renegotiation
    /// descriptions have no well-formed local equivalent and map to
    /// `InternalError`.
    pub const fn from_alert(description: AlertDescription) -> Self {
        match description {
            AlertDescription::UnexpectedMessage => TlsError::UnexpectedMessage,
            AlertDescription::BadRecordMac => TlsError::BadRecordMac,
            AlertDescription::RecordOverflow => TlsError::RecordOverflow,
            AlertDescription::DecompressionFailure => TlsError::DecompressionFailure,
            AlertDescription::HandshakeFailure => TlsError::HandshakeFailure,
            AlertDescription::BadCertificate => TlsError::BadCertificate,
            AlertDescription::UnsupportedCertificate => TlsError::UnsupportedCertificate,
            AlertDescription::CertificateRevoked => TlsError::CertificateRevoked,
            AlertDescription::CertificateExpired => TlsError::CertificateExpired,
            AlertDescription::CertificateUnknown => TlsError::CertificateUnknown,
            AlertDescription::IllegalParameter => TlsError::IllegalParameter,
            AlertDescription::UnknownCa => TlsError::UnknownCa,
            AlertDescription::AccessDenied => TlsError::AccessDenied,
            AlertDescription::DecodeError => TlsError::DecodeError,
            AlertDescription::DecryptError => TlsError::DecryptError,
            AlertDescription::ProtocolVersion => TlsError::ProtocolVersion,
            AlertDescription::InsufficientSecurity => TlsError::InsufficientSecurity,
            AlertDescription::CloseNotify
            | AlertDescription::InternalError
            | AlertDescription::UserCanceled
            | AlertDescription::NoRenegotiation => TlsError::InternalError,
        }
    }
}

impl From<DecoderError> for TlsError {
    fn from(err: DecoderError) -> Self {
        match err {
            DecoderError::LengthCapacityExceeded => TlsError::RecordOverflow,
            DecoderError::InvariantViolation(crate::content_type::UNKNOWN_CONTENT_TYPE) => {
                TlsError::UnexpectedMessage
            }
            DecoderError::InvariantViolation(crate::record::RECORD_LENGTH_OVERFLOW) => {
                TlsError::RecordOverflow
            }
            DecoderError::InvariantViolation(_) => TlsError::IllegalParameter,
            DecoderError::UnexpectedEof(_) | DecoderError::UnexpectedBytes(_) => {
                TlsError::DecodeError
            }
        }
    }
}
