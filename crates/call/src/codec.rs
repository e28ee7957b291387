//! Seam to the external binary codec collaborator.

use crate::value::WireValue;
use herald_idl::ResolvedType;

/// The binary codec that serializes values according to the wire format
/// of the target interface language.
///
/// Implementations live outside this crate. The console core only shapes
/// values and drives the codec; codec error strings pass through to the
/// caller verbatim.
pub trait WireCodec {
    /// Serialize `values` against their resolved types.
    fn encode(&self, types: &[ResolvedType], values: &[WireValue]) -> Result<Vec<u8>, String>;

    /// Deserialize reply bytes against the resolved return types.
    fn decode(&self, types: &[ResolvedType], bytes: &[u8]) -> Result<Vec<WireValue>, String>;
}
