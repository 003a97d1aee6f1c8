use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use tera::{Context, Tera};

use crate::domain::character::CharacterSummary;
use crate::dto::characters::{DetailQuery, ListQuery, TransitionResponse};
use crate::forms::characters::ListActionForm;
use crate::pagination::Paginated;
use crate::routes::{render_template, render_template_with_status, service_error_response};
use crate::services::characters::{apply_list_transition, load_detail_page, load_list_page};
use crate::state::ListViewState;
use crate::upstream::CharacterReader;

/// Raw query pairs. Repeated or malformed parameters never reject the request.
type QueryPairs = web::Query<Vec<(String, String)>>;

/// Template context shared by the full list page and the list fragment.
fn list_context(state: &ListViewState, context_query: &str) -> Context {
    let characters: Paginated<CharacterSummary> = state.into();

    let mut context = Context::new();
    context.insert("characters", &characters);
    context.insert("search_term", state.search_term().as_str());
    context.insert("context_query", context_query);
    context.insert("is_loading", &state.is_loading());
    context
}

#[get("/characters")]
pub async fn show_characters(
    params: QueryPairs,
    reader: web::Data<dyn CharacterReader>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from_pairs(&params);

    match load_list_page(reader.get_ref(), query).await {
        Ok(data) => {
            let context = list_context(&data.state, &data.context_query);
            render_template(&tera, "characters/index.html", &context)
        }
        Err(err) => service_error_response(&err),
    }
}

#[post("/characters/transition")]
pub async fn transition_characters(
    reader: web::Data<dyn CharacterReader>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ListActionForm>,
) -> impl Responder {
    let data = match apply_list_transition(reader.get_ref(), form).await {
        Ok(data) => data,
        Err(err) => return service_error_response(&err),
    };

    // Unchanged key: nothing was fetched and the page keeps its list.
    let html = if data.changed {
        match tera.render(
            "characters/list.html",
            &list_context(&data.state, &data.query),
        ) {
            Ok(html) => html,
            Err(err) => {
                log::error!("Failed to render list fragment: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        }
    } else {
        String::new()
    };

    HttpResponse::Ok().json(TransitionResponse {
        seq: data.seq,
        changed: data.changed,
        search_term: data.state.search_term().as_str().to_string(),
        current_page: data.state.current_page().get(),
        total_pages: data.state.total_pages(),
        has_previous: data.state.has_previous(),
        has_next: data.state.has_next(),
        query: data.query,
        html,
    })
}

#[get("/characters/{character_id}")]
pub async fn show_character(
    character_id: web::Path<String>,
    params: QueryPairs,
    reader: web::Data<dyn CharacterReader>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = DetailQuery::from_pairs(&params);

    let data = match load_detail_page(reader.get_ref(), &character_id, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(&err),
    };

    let mut context = Context::new();
    context.insert("back_query", &data.back_query);

    match &data.character {
        Some(character) => {
            context.insert("character", character);
            context.insert("episode_count", &character.episode_count());
            context.insert("created_display", &character.created_display());
            render_template(&tera, "characters/detail.html", &context)
        }
        None => render_template_with_status(
            &tera,
            "characters/not_found.html",
            &context,
            StatusCode::NOT_FOUND,
        ),
    }
}
