use crate::{
    codec::TupleCodec,
    key_def::KeyPart,
    obs::sink::{MetricsEvent, record},
};
use std::slice;
use tracing::{debug, warn};

/// Runtime check whether nested-path selectors survive the codec.
///
/// Builds a throwaway one-part definition with a path over field 1, dumps
/// its parts back and reports support iff the path is still there. Any
/// codec failure counts as unsupported. The probe definition is released
/// before returning.
#[must_use]
pub fn json_path_is_supported<C: TupleCodec>(codec: &C, probe_path: &str) -> bool {
    let part = KeyPart {
        path: Some(probe_path.to_string()),
        ..KeyPart::new(0, "unsigned")
    };

    let supported = match codec.key_def_new(slice::from_ref(&part)) {
        Ok(def) => match codec.key_def_dump_parts(&def) {
            Ok(parts) => parts.first().is_some_and(|dumped| dumped.path.is_some()),
            Err(err) => {
                warn!(error = %err, "path probe: dumping parts failed");
                false
            }
        },
        Err(err) => {
            warn!(error = %err, "path probe: building probe definition failed");
            false
        }
    };

    debug!(supported, "path probe finished");
    record(MetricsEvent::Probe { supported });

    supported
}
