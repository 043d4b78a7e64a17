//! `/items*` endpoints: required, optional and list-valued query parameters.

use serde_json::{json, Value};

use crate::error::RouterError;
use crate::params::{Bound, ParamSpec, ParamType};
use crate::routing::Route;

pub fn routes() -> Vec<Route> {
    vec![
        Route::get("/items/", "read_items", read_items)
            .param(ParamSpec::query("q", ParamType::Str).optional().max_length(50)),
        Route::get("/items2/", "read_items2", read_items).param(
            ParamSpec::query("q", ParamType::Str)
                .optional()
                .min_length(3)
                .max_length(50),
        ),
        Route::get("/items3/", "read_items3", read_items)
            .param(ParamSpec::query("q", ParamType::Str).min_length(3)),
        Route::get("/items4/", "read_items4", read_list).param(
            ParamSpec::query("q", ParamType::Str)
                .list()
                .default(vec!["foo", "bar"]),
        ),
        Route::get("/items5/", "read_items5", read_ordered_list)
            .param(ParamSpec::query("q", ParamType::Str).list().optional())
            .param(
                ParamSpec::query("order", ParamType::Str)
                    .one_of(&["asc", "desc"])
                    .default("asc"),
            ),
    ]
}

fn read_items(p: &Bound) -> Result<Value, RouterError> {
    let mut results = json!({ "items": [{ "item_id": "Foo" }, { "item_id": "Bar" }] });
    let q = p.get("q");
    if !q.is_null() {
        results["q"] = json!(q);
    }
    Ok(results)
}

fn read_list(p: &Bound) -> Result<Value, RouterError> {
    Ok(json!({ "q": p.get("q") }))
}

fn read_ordered_list(p: &Bound) -> Result<Value, RouterError> {
    Ok(json!({ "q": p.get("q"), "order": p.get("order") }))
}
