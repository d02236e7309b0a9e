use crate::model::{SessionKey, SignalError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Args for the routed `sdp` and `candidate` methods. Anything beyond
/// `src`/`dst` is opaque signaling payload and is relayed untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayArgs {
    /// Who the frame is from. Whatever the client put here is replaced
    /// with its real session key before the frame goes anywhere.
    #[serde(default)]
    pub src: SessionKey,
    pub dst: SessionKey,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MembersArgs {
    pub members: Vec<SessionKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExitArgs {
    #[serde(rename = "sessionKey")]
    pub session_key: SessionKey,
}

/// One wire frame: a JSON object `{method, args}` tagged by method.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "method", content = "args", rename_all = "lowercase")]
pub enum Envelope {
    Members(MembersArgs),
    Sdp(RelayArgs),
    Candidate(RelayArgs),
    Ping,
    Pong,
    Exit(ExitArgs),
}

/// First decode stage: pull the method out before touching the args.
#[derive(Deserialize)]
struct RawEnvelope {
    method: String,
    #[serde(default)]
    args: Value,
}

impl Envelope {
    /// Parses one inbound frame. Unknown methods and malformed args are
    /// both protocol violations; the caller decides what that costs.
    pub fn decode(raw: &[u8]) -> Result<Self, SignalError> {
        let frame: RawEnvelope = serde_json::from_slice(raw)
            .map_err(|e| SignalError::Protocol(format!("malformed envelope: {e}")))?;

        match frame.method.as_str() {
            // a members request carries no args worth reading
            "members" => Ok(Envelope::Members(MembersArgs::default())),
            "sdp" => Ok(Envelope::Sdp(decode_args("sdp", frame.args)?)),
            "candidate" => Ok(Envelope::Candidate(decode_args("candidate", frame.args)?)),
            "ping" => Ok(Envelope::Ping),
            "pong" => Ok(Envelope::Pong),
            "exit" => Ok(Envelope::Exit(decode_args("exit", frame.args)?)),
            other => Err(SignalError::Protocol(format!("unknown method {other}"))),
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("envelope serialization is infallible")
    }

    pub fn method(&self) -> &'static str {
        match self {
            Envelope::Members(_) => "members",
            Envelope::Sdp(_) => "sdp",
            Envelope::Candidate(_) => "candidate",
            Envelope::Ping => "ping",
            Envelope::Pong => "pong",
            Envelope::Exit(_) => "exit",
        }
    }
}

fn decode_args<T: DeserializeOwned>(method: &str, args: Value) -> Result<T, SignalError> {
    serde_json::from_value(args)
        .map_err(|e| SignalError::Protocol(format!("bad {method} args: {e}")))
}
