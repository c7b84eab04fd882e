//! Landing page

use axum::Json;
use serde::{Deserialize, Serialize};

use super::{LIST, LOGIN, SIGNUP};

/// Home page context
#[derive(Debug, Serialize, Deserialize)]
pub struct HomePage {
    pub title: String,
    pub links: HomeLinks,
}

/// Where to go from the home page
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeLinks {
    pub notes: String,
    pub login: String,
    pub signup: String,
}

/// `GET /`
pub async fn home() -> Json<HomePage> {
    Json(HomePage {
        title: "Notes".to_string(),
        links: HomeLinks {
            notes: LIST.to_string(),
            login: LOGIN.to_string(),
            signup: SIGNUP.to_string(),
        },
    })
}
