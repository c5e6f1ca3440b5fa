use server::openapi::ApiDoc;
use utoipa::OpenApi;

/// Print the OpenAPI document, or write it to the path given as the first
/// argument.
fn main() {
    let doc = ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to serialize OpenAPI document");

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, doc).expect("Failed to write OpenAPI document");
            eprintln!("wrote {path}");
        }
        None => println!("{doc}"),
    }
}
