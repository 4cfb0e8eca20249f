//! Outcome translation.
//!
//! Maps persistence outcomes and parse failures to the HTTP status and the
//! fixed user-facing message, and builds the `(status, view, model)` triple
//! handed to the renderer. The Italian texts are the service's public
//! surface and are preserved verbatim.

use crate::catalog_store::WriteOutcome;
use crate::render::ViewRenderer;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

/// Bootstrap-style text class the message view styles itself with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Success,
    Warning,
    Danger,
}

impl MessageClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageClass::Success => "text-success",
            MessageClass::Warning => "text-warning",
            MessageClass::Danger => "text-danger",
        }
    }
}

/// A fully translated response: status plus the message-view content.
#[derive(Debug, PartialEq, Eq)]
pub struct MessagePage {
    pub status: StatusCode,
    pub class: MessageClass,
    pub text: String,
}

impl MessagePage {
    fn new(status: StatusCode, class: MessageClass, text: impl Into<String>) -> Self {
        MessagePage {
            status,
            class,
            text: text.into(),
        }
    }
}

// =============================================================================
// Fixed responses
// =============================================================================

pub fn not_found() -> MessagePage {
    MessagePage::new(
        StatusCode::NOT_FOUND,
        MessageClass::Warning,
        "Risorsa o collezione non trovata.",
    )
}

pub fn internal_error() -> MessagePage {
    MessagePage::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        MessageClass::Danger,
        "Si e' verificato un errore.",
    )
}

pub fn parse_error() -> MessagePage {
    MessagePage::new(
        StatusCode::BAD_REQUEST,
        MessageClass::Danger,
        "Errore nella deserializzazione dei parametri inviati.\n\
         Specificare i parametri in maniera corretta.",
    )
}

pub fn method_not_supported() -> MessagePage {
    MessagePage::new(
        StatusCode::BAD_REQUEST,
        MessageClass::Danger,
        "Metodo HTTP non supportato.",
    )
}

pub fn malformed_id() -> MessagePage {
    MessagePage::new(
        StatusCode::BAD_REQUEST,
        MessageClass::Danger,
        "Specificare un id nel formato corretto.",
    )
}

pub fn missing_search_string() -> MessagePage {
    MessagePage::new(
        StatusCode::BAD_REQUEST,
        MessageClass::Warning,
        "Specificare la stringa di ricerca in maniera corretta.",
    )
}

// =============================================================================
// Write outcomes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Music,
    Album,
    Artist,
    Group,
    Genre,
}

struct Grammar {
    /// Capitalized display name ("Musica").
    display: &'static str,
    /// Lowercase noun with its indefinite article ("una musica").
    with_article: &'static str,
    /// Whether participles and clitics agree in the feminine.
    feminine: bool,
}

fn grammar(entity: Entity) -> Grammar {
    match entity {
        Entity::Music => Grammar {
            display: "Musica",
            with_article: "una musica",
            feminine: true,
        },
        Entity::Album => Grammar {
            display: "Album",
            with_article: "un album",
            feminine: false,
        },
        Entity::Artist => Grammar {
            display: "Artista",
            with_article: "un artista",
            feminine: false,
        },
        Entity::Group => Grammar {
            display: "Gruppo",
            with_article: "un gruppo",
            feminine: false,
        },
        Entity::Genre => Grammar {
            display: "Genere",
            with_article: "un genere",
            feminine: false,
        },
    }
}

fn agreement(grammar: &Grammar) -> &'static str {
    if grammar.feminine {
        "a"
    } else {
        "o"
    }
}

pub fn insert_outcome(entity: Entity, id: i64, outcome: WriteOutcome) -> MessagePage {
    let g = grammar(entity);
    match outcome {
        WriteOutcome::Success(_) => MessagePage::new(
            StatusCode::CREATED,
            MessageClass::Success,
            format!(
                "{} con id {} aggiunt{} con successo.",
                g.display,
                id,
                agreement(&g)
            ),
        ),
        WriteOutcome::Conflict => MessagePage::new(
            StatusCode::CONFLICT,
            MessageClass::Warning,
            format!("Esiste gia' {} con id {}.", g.with_article, id),
        ),
        // The store never reports a missing row on insert
        WriteOutcome::NotExists | WriteOutcome::BackendFailure => internal_error(),
    }
}

pub fn update_outcome(entity: Entity, id: i64, outcome: WriteOutcome) -> MessagePage {
    let g = grammar(entity);
    match outcome {
        WriteOutcome::Success(_) => MessagePage::new(
            StatusCode::OK,
            MessageClass::Success,
            format!(
                "{} con id {} modificat{} con successo.",
                g.display,
                id,
                agreement(&g)
            ),
        ),
        WriteOutcome::NotExists => MessagePage::new(
            StatusCode::BAD_REQUEST,
            MessageClass::Warning,
            format!(
                "Non esiste {} con id {}, impossibile aggiornarl{}.",
                g.with_article,
                id,
                agreement(&g)
            ),
        ),
        WriteOutcome::Conflict | WriteOutcome::BackendFailure => internal_error(),
    }
}

pub fn delete_outcome(entity: Entity, id: i64, outcome: WriteOutcome) -> MessagePage {
    let g = grammar(entity);
    match outcome {
        WriteOutcome::Success(_) => MessagePage::new(
            StatusCode::OK,
            MessageClass::Success,
            format!(
                "{} con id {} eliminat{} con successo.",
                g.display,
                id,
                agreement(&g)
            ),
        ),
        WriteOutcome::NotExists => MessagePage::new(
            StatusCode::BAD_REQUEST,
            MessageClass::Warning,
            format!(
                "Non esiste {} con id {}, impossibile eliminarl{}.",
                g.with_article,
                id,
                agreement(&g)
            ),
        ),
        WriteOutcome::Conflict | WriteOutcome::BackendFailure => internal_error(),
    }
}

/// Links have no unique key, so anything short of a backend failure is a
/// successful insert.
pub fn link_insert_outcome(music_id: i64, outcome: WriteOutcome) -> MessagePage {
    match outcome {
        WriteOutcome::BackendFailure => internal_error(),
        _ => MessagePage::new(
            StatusCode::CREATED,
            MessageClass::Success,
            format!("Link per la canzone {} aggiunto con successo.", music_id),
        ),
    }
}

// =============================================================================
// Response building
// =============================================================================

pub fn view_response(
    renderer: &dyn ViewRenderer,
    status: StatusCode,
    view: &str,
    model: Value,
) -> Response {
    (status, Html(renderer.render(view, &model))).into_response()
}

pub fn message_response(renderer: &dyn ViewRenderer, page: MessagePage) -> Response {
    info!("Returned: {}", page.text);
    let model = json!({
        "messagetype": page.class.css_class(),
        "messagetext": page.text,
    });
    view_response(renderer, page.status, "message", model)
}

/// A read hit the distinguished backend-unavailable signal.
pub fn backend_failure(renderer: &dyn ViewRenderer, err: anyhow::Error) -> Response {
    error!("Backend unavailable: {:#}", err);
    message_response(renderer, internal_error())
}

pub fn to_model_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// The uniform shape of every plain paged listing: parse the page, fetch,
/// 404 on an empty result, otherwise echo the rows and the page number back
/// in the model.
pub fn paged_list_response<T, F>(
    renderer: &dyn ViewRenderer,
    params: &super::params::ParamMap,
    list_key: &'static str,
    view: &'static str,
    fetch: F,
) -> Response
where
    T: Serialize,
    F: FnOnce(u32) -> anyhow::Result<Vec<T>>,
{
    let Ok(page) = super::params::page(params) else {
        return message_response(renderer, parse_error());
    };
    match fetch(page) {
        Err(err) => backend_failure(renderer, err),
        Ok(list) if list.is_empty() => message_response(renderer, not_found()),
        Ok(list) => {
            info!("Returned: {} rows of {} (page {})", list.len(), list_key, page);
            let mut model = serde_json::Map::new();
            model.insert(list_key.to_string(), to_model_value(&list));
            model.insert("page".to_string(), page.into());
            view_response(renderer, StatusCode::OK, view, Value::Object(model))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_messages_match_the_originals() {
        let page = insert_outcome(Entity::Music, 5, WriteOutcome::Success(1));
        assert_eq!(page.status, StatusCode::CREATED);
        assert_eq!(page.class, MessageClass::Success);
        assert_eq!(page.text, "Musica con id 5 aggiunta con successo.");

        let page = insert_outcome(Entity::Music, 5, WriteOutcome::Conflict);
        assert_eq!(page.status, StatusCode::CONFLICT);
        assert_eq!(page.class, MessageClass::Warning);
        assert_eq!(page.text, "Esiste gia' una musica con id 5.");

        assert_eq!(
            insert_outcome(Entity::Album, 3, WriteOutcome::Success(1)).text,
            "Album con id 3 aggiunto con successo."
        );
        assert_eq!(
            insert_outcome(Entity::Artist, 7, WriteOutcome::Conflict).text,
            "Esiste gia' un artista con id 7."
        );
        assert_eq!(
            insert_outcome(Entity::Group, 2, WriteOutcome::Success(1)).text,
            "Gruppo con id 2 aggiunto con successo."
        );
        assert_eq!(
            insert_outcome(Entity::Genre, 9, WriteOutcome::Conflict).text,
            "Esiste gia' un genere con id 9."
        );
    }

    #[test]
    fn update_messages_match_the_originals() {
        assert_eq!(
            update_outcome(Entity::Music, 5, WriteOutcome::Success(1)).text,
            "Musica con id 5 modificata con successo."
        );
        let page = update_outcome(Entity::Music, 5, WriteOutcome::NotExists);
        assert_eq!(page.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            page.text,
            "Non esiste una musica con id 5, impossibile aggiornarla."
        );
        assert_eq!(
            update_outcome(Entity::Artist, 7, WriteOutcome::NotExists).text,
            "Non esiste un artista con id 7, impossibile aggiornarlo."
        );
    }

    #[test]
    fn delete_messages_match_the_originals() {
        assert_eq!(
            delete_outcome(Entity::Music, 5, WriteOutcome::Success(1)).text,
            "Musica con id 5 eliminata con successo."
        );
        assert_eq!(
            delete_outcome(Entity::Music, 5, WriteOutcome::NotExists).text,
            "Non esiste una musica con id 5, impossibile eliminarla."
        );
        assert_eq!(
            delete_outcome(Entity::Album, 4, WriteOutcome::NotExists).text,
            "Non esiste un album con id 4, impossibile eliminarlo."
        );
    }

    #[test]
    fn backend_failure_is_always_internal_error() {
        for page in [
            insert_outcome(Entity::Music, 1, WriteOutcome::BackendFailure),
            update_outcome(Entity::Artist, 1, WriteOutcome::BackendFailure),
            delete_outcome(Entity::Album, 1, WriteOutcome::BackendFailure),
            link_insert_outcome(1, WriteOutcome::BackendFailure),
        ] {
            assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(page.text, "Si e' verificato un errore.");
        }
    }

    #[test]
    fn link_insert_never_conflicts() {
        let page = link_insert_outcome(3, WriteOutcome::Success(1));
        assert_eq!(page.status, StatusCode::CREATED);
        assert_eq!(page.text, "Link per la canzone 3 aggiunto con successo.");
    }
}
