//! `/blog` endpoints.

use serde_json::{json, Value};

use crate::blog::Blog;
use crate::error::RouterError;
use crate::params::{Bound, ParamSpec, ParamType};
use crate::routing::Route;

/// Blog routes in declaration order. `/blog/unpublished` must precede `/blog/{id}`.
pub fn routes() -> Vec<Route> {
    vec![
        Route::get("/blog", "blog_list", blog_list)
            .param(ParamSpec::query("limit", ParamType::Int).default(10i64))
            .param(
                ParamSpec::query("published", ParamType::Bool)
                    .alias("is-published")
                    .default(true),
            )
            .param(
                ParamSpec::query("sort", ParamType::Str)
                    .optional()
                    .min_length(3)
                    .max_length(20)
                    .pattern("^-?[a-z_]+$")
                    .deprecated()
                    .description("Sort key, prefix with '-' for descending"),
            ),
        Route::post("/blog", "create_blog", create_blog).json_body::<Blog>(),
        Route::post("/blog/{user_id}", "create_user_blog", create_user_blog)
            .param(ParamSpec::path("user_id", ParamType::Int).ge(0.0).le(1000.0))
            .param(ParamSpec::query("published", ParamType::Bool).default(false))
            .json_body::<Blog>(),
        Route::get("/blog/unpublished", "unpublished", unpublished),
        Route::get("/blog/{id}", "show", show)
            .param(ParamSpec::path("id", ParamType::Int))
            .param(
                ParamSpec::query("size", ParamType::Float)
                    .alias("item-size")
                    .gt(0.0)
                    .lt(10.5)
                    .optional(),
            ),
        Route::get("/blog/{id}/comments", "comments", comments)
            .param(ParamSpec::path("id", ParamType::Int))
            .param(ParamSpec::query("limit", ParamType::Int).default(10i64)),
        Route::get("/blog/{id}/comments/{user_id}", "user_comments", user_comments)
            .param(ParamSpec::path("id", ParamType::Int))
            .param(ParamSpec::path("user_id", ParamType::Int))
            .param(ParamSpec::query("limit", ParamType::Int).default(10i64)),
    ]
}

fn blog_list(p: &Bound) -> Result<Value, RouterError> {
    let limit = p.get("limit");
    if p.get("published").as_bool().unwrap_or(true) {
        return Ok(json!({ "data": format!("{} published blogs from db", limit) }));
    }
    Ok(json!({ "data": format!("{} blogs from db, {}", limit, p.get("sort")) }))
}

fn create_blog(p: &Bound) -> Result<Value, RouterError> {
    let blog: Blog = p.body()?;
    Ok(json!({ "data": format!("Blog is created with title {}", blog.title) }))
}

fn create_user_blog(p: &Bound) -> Result<Value, RouterError> {
    let blog: Blog = p.body()?;
    Ok(json!({
        "data": format!(
            "Blog is created with title {} and user is {} with publish status {}",
            blog.title,
            p.get("user_id"),
            p.get("published"),
        )
    }))
}

fn unpublished(_: &Bound) -> Result<Value, RouterError> {
    Ok(json!({ "data": "all unpublished blogs" }))
}

fn show(p: &Bound) -> Result<Value, RouterError> {
    Ok(json!({ "data": p.get("id"), "size": p.get("size") }))
}

fn comments(p: &Bound) -> Result<Value, RouterError> {
    Ok(json!({ "data": { "comments": p.get("id"), "limit": p.get("limit") } }))
}

fn user_comments(p: &Bound) -> Result<Value, RouterError> {
    Ok(json!({
        "data": {
            "comments": p.get("id"),
            "user": p.get("user_id"),
            "limit": p.get("limit"),
        }
    }))
}
