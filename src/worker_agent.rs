//! Web Worker agent that extracts still frames off the UI thread.

use crate::cache::first_frame;
use futures::sink::SinkExt;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use yew_agent::reactor::{reactor, ReactorScope};

/// Request for the first frame of an animated payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FrameArgs {
    pub source: String,
}

/// Either `(source, still_frame)` or `(source, error_message)`.
pub type FrameResult = Result<(String, String), (String, String)>;

/// Worker reactor that answers each `FrameArgs` with a `FrameResult`.
#[reactor]
pub async fn FrameTask(mut scope: ReactorScope<FrameArgs, FrameResult>) {
    while let Some(args) = scope.next().await {
        let res = match first_frame(&args.source) {
            Ok(frame) => Ok((args.source, frame)),
            Err(e) => Err((args.source, e.to_string())),
        };

        // abort loop if all bridges dropped
        if scope.send(res).await.is_err() {
            break;
        }
    }
}
