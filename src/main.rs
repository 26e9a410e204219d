use hotel_booking_management::adapter::driven::{ConsoleLogger, InMemoryOrderRepository};
use hotel_booking_management::adapter::driver::rest_api::{create_router, AppStateInner};
use hotel_booking_management::application::processor::OrderProcessor;
use hotel_booking_management::application::service::OrderApplicationService;
use hotel_booking_management::application::worker::{UnprocessedOrderIterator, Worker};
use hotel_booking_management::domain::model::{HotelId, RoomAvailability, RoomId};
use hotel_booking_management::domain::port::Logger;
use hotel_booking_management::domain::service::{AvailabilityEngine, BookingService};

use chrono::NaiveDate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

/// 初期の空室データを作成
/// reddison/lux: 2024-01-01〜01-04 は各1室、01-05 は0室
fn seed_availability() -> Result<Vec<RoomAvailability>, Box<dyn std::error::Error>> {
    let mut seed = Vec::new();
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid seed date")?;

    for _ in 0..4 {
        seed.push(RoomAvailability::new(
            HotelId::new("reddison"),
            RoomId::new("lux"),
            day,
            1,
        ));
        day = day.succ_opt().ok_or("invalid seed date")?;
    }
    seed.push(RoomAvailability::new(
        HotelId::new("reddison"),
        RoomId::new("lux"),
        day,
        0,
    ));

    Ok(seed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ホテル予約管理システム REST API ===");
    println!();

    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    // 空室テーブルとオーダーストアを作成
    let engine = Arc::new(AvailabilityEngine::new(seed_availability()?, logger.clone()));
    let order_repository = Arc::new(InMemoryOrderRepository::with_capacity(1000));
    println!("空室データを読み込みました");

    // 予約ワーカーを起動
    let booking_service = Arc::new(BookingService::new(engine, logger.clone()));
    let processor = OrderProcessor::new(booking_service, order_repository.clone());
    let iterator = UnprocessedOrderIterator::new(order_repository.clone());
    let worker = Worker::new(iterator, processor, logger.clone());

    let cancel = CancellationToken::new();
    let worker_cancel = cancel.clone();
    let worker_handle = tokio::spawn(async move {
        worker.run(worker_cancel).await;
    });

    // アプリケーション状態を作成
    let order_service = OrderApplicationService::new(order_repository);
    let app_state = AppStateInner {
        order_service: Arc::new(order_service),
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    println!("REST APIサーバーが起動しました: http://localhost:8080");
    println!("ヘルスチェック: GET http://localhost:8080/health");
    println!("API仕様:");
    println!("  POST /orders - 注文作成");
    println!("  GET  /orders/:id - 注文取得（処理結果の確認）");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    // ワーカーを停止してから終了する
    cancel.cancel();
    worker_handle.await?;

    Ok(())
}
