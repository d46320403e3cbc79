pub mod orders;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::place_order,
        orders::list_orders,
        orders::get_order,
        orders::get_invoice,
        orders::reissue_invoice,
    ),
    components(schemas(
        orders::CartLineRequest,
        orders::PlaceOrderRequest,
        orders::PlaceOrderResponse,
        orders::OrderResponse,
        orders::OrderItemResponse,
        orders::ListOrdersResponse,
    )),
    tags((name = "orders", description = "Checkout and order queries"))
)]
pub struct ApiDoc;
