use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // 生产环境应当收紧为站点域名
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        // 放宽自定义 Header，避免预检失败
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
