use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI fragment describing the products resource; the HTTP host merges
/// it into the served document.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_products,
        handlers::get_product,
        handlers::create_product,
        handlers::update_product,
        handlers::delete_product,
    ),
    components(schemas(
        dto::ProductDto,
        dto::CreateProductReq,
        dto::UpdateProductReq,
        dto::ProductListDto,
        dto::PaginationDto,
        modkit::Problem,
        modkit::api::response::MessageBody,
    )),
    tags((name = "products", description = "Product catalog CRUD"))
)]
pub struct ProductsApiDoc;
