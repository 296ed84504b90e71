use std::sync::Arc;

use testing_tutorial::{
    app::users::pg_store::PgUserStore,
    build_router,
    config::load_config,
    infrastructure::{database::DatabaseManager, logger::Logger},
    AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            std::process::exit(1);
        }
    };

    Logger::init(&config.logging.level);

    // 数据库不可用时直接退出，不重试
    let db = match DatabaseManager::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("数据库连接失败: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(PgUserStore::new(db.get_pool().clone()));
    let app = build_router(AppState::new(store));

    let listener = match config.http.socket_addr() {
        Ok(addr) => match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("无法绑定到 {}: {}", addr, e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 服务器运行在 http://{}:{}", config.http.bind_address, config.http.port);
    info!("📖 API 端点:");
    info!("   GET    /              - 欢迎信息");
    info!("   GET    /hello/:name   - 问候");
    info!("   POST   /sum           - 两数求和");
    info!("   POST   /users         - 创建用户");
    info!("   GET    /users/:id     - 获取用户");
    info!("   PUT    /users/:id     - 更新用户");
    info!("   DELETE /users/:id     - 删除用户");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("服务器错误: {}", e);
    }

    db.disconnect().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，正在停止服务器...");
}
