use super::DbPool;
use crate::errors::StorageError;
use budgetpace_core::errors::{DatabaseError, Error, Result};
use diesel::SqliteConnection;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection and reports a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type JobEnvelope = (
    Job<Box<dyn Any + Send + 'static>>,
    oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<JobEnvelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_stopped("writer actor is not accepting jobs"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_stopped("writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_stopped("writer actor returned an unexpected type"))
    }
}

fn writer_stopped(reason: &str) -> Error {
    Error::Database(DatabaseError::Internal(reason.to_string()))
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor holds one pooled connection for its lifetime and runs
/// jobs serially, so no two writes ever interleave.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<JobEnvelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Writer actor could not acquire a connection: {}", e);
                // Dropping the receiver makes every pending and future job fail.
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    // A panicking job rolls back like a failed one and the
                    // actor keeps serving.
                    match catch_unwind(AssertUnwindSafe(|| job(c))) {
                        Ok(outcome) => outcome.map_err(StorageError::from),
                        Err(_) => {
                            log::error!("Write job panicked; transaction rolled back");
                            Err(writer_stopped("write job panicked").into())
                        }
                    }
                })
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; nothing to report then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
