//! OpenAPI document for the catalog API.

use crate::error::ErrorBody;
use crate::handlers::products;
use crate::model::{NewProduct, Product, ProductPatch, ProductRecord, ProductView};
use crate::response::{DeletedBody, PageEnvelope};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        description = "CRUD, paginated listing, and substring search for a product catalog"
    ),
    paths(
        products::create,
        products::list,
        products::search,
        products::get_by_id,
        products::update,
        products::delete_product,
    ),
    components(schemas(
        NewProduct,
        Product,
        ProductPatch,
        ProductRecord,
        ProductView,
        PageEnvelope,
        DeletedBody,
        ErrorBody,
    )),
    tags((name = "products", description = "Product catalog operations")),
    servers((url = "/api/v1"))
)]
pub struct ApiDoc;
