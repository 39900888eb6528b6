use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::clock::Clock;
use crate::error::SubmitResult;
use crate::oracle::Oracle;
use crate::session::Session;
use crate::state::Prediction;

/// Run one prediction end to end: validate, enter `Thinking`, wait out the
/// sampled delay, enter `Result`.
///
/// `sleep` supplies the suspension, e.g. `tokio::time::sleep`. The session is
/// borrowed for the whole run, so a second submission cannot interleave.
pub async fn run_prediction<C, R, O, F, Fut>(
    session: &mut Session,
    raw: &str,
    clock: &C,
    rng: &mut R,
    oracle: &mut O,
    sleep: F,
) -> SubmitResult<Prediction>
where
    C: Clock + ?Sized,
    R: Rng + ?Sized,
    O: Oracle + ?Sized,
    F: FnOnce(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    let submission = session.submit(raw, clock.now(), rng)?;
    sleep(submission.delay).await;
    Ok(session.resolve(submission, clock.now(), oracle).clone())
}
