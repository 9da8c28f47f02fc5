use super::*;
use std::{io::Cursor, time::Duration};

use axum::{http::StatusCode, routing::get, Router};
use image::{ImageFormat, Rgba, RgbaImage};
use tokio::net::TcpListener;

use crate::slot::{ImageSlot, SlotState};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("encode png");
    cursor.into_inner()
}

async fn spawn_image_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let png = png_bytes(16, 8);
    let app = Router::new()
        .route(
            "/frog.png",
            get(move || {
                let png = png.clone();
                async move { ([("content-type", "image/png")], png) }
            }),
        )
        .route("/broken.png", get(|| async { "definitely not a png" }))
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn wait_for_settled(slot: &ImageSlot) -> SlotState {
    for _ in 0..200 {
        let state = slot.state();
        if !matches!(state, SlotState::Loading { .. }) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("image load did not settle: {:?}", slot.state());
}

#[test]
fn decode_without_target_keeps_dimensions() {
    let image = decode_image(&png_bytes(5, 3), None).expect("decode");
    assert_eq!((image.width, image.height), (5, 3));
    assert_eq!(image.rgba.len(), 5 * 3 * 4);
    assert_eq!(&image.rgba[..4], &[200, 40, 40, 255]);
}

#[test]
fn decode_centre_crops_into_target_box() {
    let image = decode_image(&png_bytes(40, 10), Some((10, 10))).expect("decode");
    assert_eq!((image.width, image.height), (10, 10));
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"nope", None).is_err());
}

#[tokio::test]
async fn loads_image_into_bound_slot() {
    let base = spawn_image_server().await;
    let loader = HttpImageLoader::new(Handle::current()).with_target_box(4, 4);
    let slot = ImageSlot::new();
    let url = format!("{base}/frog.png");

    loader.load(&url, slot.bind(&url));

    match wait_for_settled(&slot).await {
        SlotState::Ready(image) => assert_eq!((image.width, image.height), (4, 4)),
        other => panic!("unexpected slot state: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_marks_slot_failed() {
    let base = spawn_image_server().await;
    let loader = HttpImageLoader::new(Handle::current());
    let slot = ImageSlot::new();
    let url = format!("{base}/missing.png");

    loader.load(&url, slot.bind(&url));

    match wait_for_settled(&slot).await {
        SlotState::Failed { url: failed_url, reason } => {
            assert_eq!(failed_url, url);
            assert!(reason.contains("404"), "unexpected reason: {reason}");
        }
        other => panic!("unexpected slot state: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_marks_slot_failed() {
    let base = spawn_image_server().await;
    let loader = HttpImageLoader::new(Handle::current());
    let slot = ImageSlot::new();
    let url = format!("{base}/broken.png");

    loader.load(&url, slot.bind(&url));

    match wait_for_settled(&slot).await {
        SlotState::Failed { reason, .. } => {
            assert!(reason.starts_with("image decode failed"), "unexpected reason: {reason}")
        }
        other => panic!("unexpected slot state: {other:?}"),
    }
}

#[tokio::test]
async fn rebinding_before_completion_keeps_newer_state() {
    let base = spawn_image_server().await;
    let loader = HttpImageLoader::new(Handle::current());
    let slot = ImageSlot::new();
    let first = format!("{base}/frog.png");

    loader.load(&first, slot.bind(&first));
    slot.clear();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(slot.state(), SlotState::Empty);
}

#[tokio::test]
async fn failure_for_rebound_slot_keeps_newer_binding() {
    let base = spawn_image_server().await;
    let loader = HttpImageLoader::new(Handle::current());
    let slot = ImageSlot::new();
    let missing = format!("{base}/missing.png");
    let next = format!("{base}/next.png");

    loader.load(&missing, slot.bind(&missing));
    let _pending = slot.bind(&next);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(slot.state(), SlotState::Loading { url: next });
}
