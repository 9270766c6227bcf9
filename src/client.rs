use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::RepurposeFoot;

/// Public API for the repurposer service - owns the task
pub struct RepurposeBackend
{   hand: crate::RepurposeHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl RepurposeBackend
{   /// Create and spawn a new service over the given config.
    /// Credentials are resolved before returning.
    pub fn new(
      config: &crate::config::RepurposerConfig
    ) -> Result<Self, crate::error::Error>
    {   let repurposer = crate::Repurposer::new(config)?;
        Ok(RepurposeBackend::with_repurposer(repurposer))
    }

    /// Spawn the service around an already built repurposer
    pub fn with_repurposer(repurposer: crate::Repurposer) -> Self
    {   debug!("Creating RepurposeBackend with task ownership");

        let (repurpose_tx, repurpose_rx)
          = mpsc::unbounded_channel();
        let (repurpose_all_tx, repurpose_all_rx)
          = mpsc::unbounded_channel();
        let (list_formats_tx, list_formats_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::RepurposeHand
        {   repurpose_tx
          , repurpose_all_tx
          , list_formats_tx
          , kill_process_tx
        };

        let foot = crate::RepurposeFoot
        {   repurpose_rx
          , repurpose_all_rx
          , list_formats_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, Arc::new(repurposer)).await
        });

        RepurposeBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a single-format request - returns almost immediately
    pub fn repurpose(
      &self
    , content: String
    , format_id: String
    , backend_id: String
    ) -> Result<
        mpsc::UnboundedReceiver<crate::RepurposeReply>,
        crate::error::Error
      >
    {   debug!("repurpose queuing {} via {}", format_id, backend_id);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::RepurposeArgs
        {   content
          , format_id
          , backend_id
          , reply: reply_tx
        };

        self.hand.repurpose_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Queue an all-format request - returns almost immediately
    pub fn repurpose_all(
      &self
    , content: String
    , backend_id: String
    ) -> Result<
        mpsc::UnboundedReceiver<crate::RepurposeAllReply>,
        crate::error::Error
      >
    {   debug!("repurpose_all queuing via {}", backend_id);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::RepurposeAllArgs
        {   content
          , backend_id
          , reply: reply_tx
        };

        self.hand.repurpose_all_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Queue a format listing - returns almost immediately
    pub fn list_formats(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::ListFormatsReply>,
        crate::error::Error
      >
    {   debug!("list_formats queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::ListFormatsArgs
        {   reply: reply_tx
        };

        self.hand.list_formats_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the service
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down RepurposeBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend dropped shutdown reply");
            Err(crate::error::Error::Other(
              "Backend exited without confirming shutdown".to_string()
            ))
        }
    }
}

fn disconnected() -> crate::error::Error
{   error!("Backend channel closed");
    crate::error::Error::Other("Backend disconnected".to_string())
}

/// Main service event loop
///
/// select! only routes. Generation work runs on its own task so a
/// slow backend never holds up listing or shutdown.
async fn run_backend_loop(
  foot: crate::RepurposeFoot
, repurposer: Arc<crate::Repurposer>
)
{   debug!("Starting RepurposeBackend event loop");
    let RepurposeFoot
    {   mut repurpose_rx
      , mut repurpose_all_rx
      , mut list_formats_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = repurpose_rx.recv() => {
          debug!("Received Repurpose for: {}", cmd.format_id);
          let repurposer = Arc::clone(&repurposer);
          tokio::spawn(async move {
            let result = repurposer
              .repurpose(&cmd.content, &cmd.format_id, &cmd.backend_id)
              .await;
            let _ = cmd.reply.send(result);
          });
        }
      , Some(cmd) = repurpose_all_rx.recv() => {
          debug!("Received RepurposeAll via: {}", cmd.backend_id);
          let repurposer = Arc::clone(&repurposer);
          tokio::spawn(async move {
            let results = repurposer
              .repurpose_all(&cmd.content, &cmd.backend_id)
              .await;
            let _ = cmd.reply.send(results);
          });
        }
      , Some(cmd) = list_formats_rx.recv() => {
          debug!("Received ListFormats");
          let _ = cmd.reply.send(repurposer.formats());
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("RepurposeBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
