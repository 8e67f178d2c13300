pub mod my_list_routes;

pub use my_list_routes::create_my_list_router;
