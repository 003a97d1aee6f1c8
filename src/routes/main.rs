use actix_web::{Responder, get};

use crate::routes::redirect_permanent;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect_permanent("/characters")
}
