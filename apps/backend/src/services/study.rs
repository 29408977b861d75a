//! Study session orchestration.
//!
//! Loads words from the database, drives the session state machine and
//! writes statistics. A statistics commit is written before the new session
//! state is stored, so a failed write leaves the session exactly as it was.

use chrono::Utc;
use uuid::Uuid;
use vocab_core::{Action, SessionError, StudySession};

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::sessions::{SessionSlot, SessionStore};

/// Start a session for `token`, discarding any session it already had.
pub async fn start(
    db: &Database,
    sessions: &SessionStore,
    token: Uuid,
    request: &StartStudyRequest,
) -> Result<StudyState> {
    if request.page_ids.is_empty() {
        return Err(ApiError::BadRequest("Select at least one page".to_string()));
    }

    let words = db.list_words(&request.page_ids).await?;
    let snapshots: Vec<WordSnapshot> = words.iter().map(DbWord::to_snapshot).collect();
    let word_count = snapshots.len();

    let mut session = StudySession::start(request.options(), snapshots, &mut rand::rng())?;
    let state = render(&mut session)?;

    if sessions.clear(token).await.is_some() {
        tracing::debug!(%token, "replacing previous study session");
    }
    sessions.set(token, session).await;

    tracing::info!(
        %token,
        direction = request.direction.as_str(),
        method = request.method.as_str(),
        mode = request.mode.as_str(),
        words = word_count,
        "study session started"
    );
    Ok(state)
}

/// Current word (pinned for follow-up actions) or the final summary.
pub async fn current(sessions: &SessionStore, token: Uuid) -> Result<StudyState> {
    let slot = load(sessions, token).await?;
    let mut session = slot.lock().await;
    render(&mut session)
}

/// Apply one learner action.
pub async fn act(
    db: &Database,
    sessions: &SessionStore,
    token: Uuid,
    action: Action,
) -> Result<ActionResponse> {
    // held until the new state is stored, so a retried request sees the result
    let slot = load(sessions, token).await?;
    let mut session = slot.lock().await;
    let action_name = action.name();
    let transition = session.apply(action, Utc::now())?;

    if let Some(commit) = transition.commit {
        if let Err(err) = db
            .commit_outcome(commit.word_id, commit.outcome, commit.at)
            .await
        {
            tracing::error!(%token, word_id = commit.word_id, error = %err, "statistics commit failed");
            return Err(err);
        }
        tracing::debug!(%token, word_id = commit.word_id, outcome = ?commit.outcome, "statistics committed");
    }

    let mut next = transition.session;
    let state = render(&mut next)?;
    *session = next;

    tracing::debug!(%token, action = action_name, "study action applied");
    Ok(ActionResponse {
        feedback: transition.feedback,
        state,
    })
}

/// End the session explicitly and return its summary.
pub async fn end(sessions: &SessionStore, token: Uuid) -> Result<EndStudyResponse> {
    let session = sessions
        .clear(token)
        .await
        .ok_or(SessionError::NoActiveSession)?;

    let labels = SessionLabels::from_options(session.options());
    let summary = session.end();
    tracing::info!(
        %token,
        studied = summary.words_studied,
        accuracy = summary.accuracy,
        "study session ended"
    );
    Ok(EndStudyResponse { labels, summary })
}

async fn load(sessions: &SessionStore, token: Uuid) -> Result<SessionSlot> {
    sessions
        .slot(token)
        .await
        .ok_or_else(|| SessionError::NoActiveSession.into())
}

fn render(session: &mut StudySession) -> Result<StudyState> {
    let labels = SessionLabels::from_options(session.options());
    if session.is_complete() {
        return Ok(StudyState::Complete {
            labels,
            summary: session.summary(),
        });
    }

    let word = session.current_word(&mut rand::rng())?;
    Ok(StudyState::InProgress { labels, word })
}
