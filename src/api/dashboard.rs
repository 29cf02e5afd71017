//! Home page endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::dashboard::{DashboardPage, HIGHLIGHTED_WORD},
    AppState,
};

/// Catalog figures and the visit count of the caller's session
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Home page figures; sets the session cookie on first visit", body = DashboardPage)
    )
)]
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<DashboardPage>)> {
    let (jar, session_id) = session(jar, &state.config.session.cookie_name);

    let counts = state.services.catalog.counts(HIGHLIGHTED_WORD).await?;
    let num_visits = state.services.sessions.record_visit(&session_id).await?;

    Ok((
        jar,
        Json(DashboardPage {
            counts,
            word: HIGHLIGHTED_WORD.to_string(),
            num_visits,
        }),
    ))
}

/// Session id from the cookie, or a fresh one added to the jar
fn session(jar: CookieJar, cookie_name: &str) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(cookie_name)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        return (jar, id);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((cookie_name.to_string(), id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_existing_session() {
        let id = Uuid::new_v4();
        let jar = CookieJar::new().add(Cookie::new("sessionid", id.to_string()));

        let (_, found) = session(jar, "sessionid");
        assert_eq!(found, id);
    }

    #[test]
    fn starts_a_session_when_cookie_is_missing_or_garbled() {
        let (jar, id) = session(CookieJar::new(), "sessionid");
        assert_eq!(jar.get("sessionid").map(|c| c.value().to_string()), Some(id.to_string()));

        let garbled = CookieJar::new().add(Cookie::new("sessionid", "not-a-uuid"));
        let (jar, id) = session(garbled, "sessionid");
        assert_eq!(jar.get("sessionid").map(|c| c.value().to_string()), Some(id.to_string()));
    }
}
