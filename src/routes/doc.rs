use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::DashboardView,
        auth::{LoginRequest, SessionView},
        cart::{AddToCartRequest, AdjustQuantityRequest, CartLineView, CartView},
        contact::{ContactRequest, DeepLink},
        orders::{
            CheckoutRequest, CheckoutResponse, OrderDetail, OrderList, SelectAllRequest,
            SelectionView, UpdateOrderStatusRequest,
        },
        products::{CatalogEntry, CatalogList, ProductList, SizeOption, UpsertProductRequest},
    },
    error::Level,
    filter::{DashboardStats, OrderFilter, ProductFilter},
    models::{BagSize, CartLine, Order, OrderStatus, Product},
    response::{ApiResponse, Meta, Removed},
    routes::{admin, auth, cart, contact, exports, health, orders, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_catalog,
        cart::view_cart,
        cart::add_to_cart,
        cart::adjust_quantity,
        cart::remove_from_cart,
        orders::checkout,
        contact::contact,
        auth::login,
        auth::logout,
        auth::session,
        admin::dashboard,
        admin::list_products,
        admin::list_low_stock,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::toggle_visibility,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::delete_order,
        admin::toggle_selection,
        admin::select_all,
        admin::clear_selection,
        admin::delete_selected,
        exports::products_csv,
        exports::products_report,
        exports::orders_csv,
        exports::orders_report,
        exports::orders_backup,
        exports::receipt,
    ),
    components(
        schemas(
            Product,
            Order,
            OrderStatus,
            BagSize,
            CartLine,
            CatalogEntry,
            CatalogList,
            SizeOption,
            UpsertProductRequest,
            ProductList,
            AddToCartRequest,
            AdjustQuantityRequest,
            CartLineView,
            CartView,
            CheckoutRequest,
            CheckoutResponse,
            OrderDetail,
            OrderList,
            UpdateOrderStatusRequest,
            SelectAllRequest,
            SelectionView,
            ContactRequest,
            DeepLink,
            LoginRequest,
            SessionView,
            DashboardView,
            DashboardStats,
            ProductFilter,
            OrderFilter,
            Level,
            Removed,
            Meta,
            ApiResponse<Product>,
            ApiResponse<CatalogList>,
            ApiResponse<CartView>,
            ApiResponse<OrderList>,
            ApiResponse<ProductList>,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Storefront catalog"),
        (name = "Cart", description = "Browser-local cart"),
        (name = "Orders", description = "Checkout"),
        (name = "Contact", description = "WhatsApp contact form"),
        (name = "Auth", description = "Admin session"),
        (name = "Admin", description = "Product and order management"),
        (name = "Export", description = "CSV, report, receipt and backup downloads"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
