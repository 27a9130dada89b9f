//! アセットカタログの生成
//!
//! 画像ファイルは持たず、全テクスチャをコード内で生成する。

use crate::assets::GameAssets;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Images から GameAssets を構築する
pub fn create_game_assets(images: &mut Assets<Image>) -> GameAssets {
    GameAssets {
        floor: create_bordered_texture(images, 32, [58, 58, 66, 255], [52, 52, 60, 255]),
        wall: create_bordered_texture(images, 32, [92, 88, 84, 255], [70, 66, 62, 255]),
        desk: create_bordered_texture(images, 32, [126, 88, 56, 255], [96, 64, 40, 255]),
        dest_desk: create_bordered_texture(images, 32, [86, 110, 140, 255], [60, 80, 104, 255]),
        printer: create_bordered_texture(images, 32, [70, 74, 82, 255], [48, 52, 58, 255]),
        paper: create_bordered_texture(images, 16, [236, 236, 230, 255], [200, 200, 196, 255]),
        money: create_bordered_texture(images, 16, [96, 168, 92, 255], [60, 120, 64, 255]),
        player: create_circle_texture(images, 64, [224, 172, 120, 255]),
        money_pad: create_ring_texture(images, 64, [180, 160, 90, 255]),
    }
}

/// 縁取り付きの矩形テクスチャ
fn create_bordered_texture(
    images: &mut Assets<Image>,
    size: u32,
    fill: [u8; 4],
    border: [u8; 4],
) -> Handle<Image> {
    let border_width = (size / 16).max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let edge = x < border_width
                || y < border_width
                || x >= size - border_width
                || y >= size - border_width;
            let pixel = if edge { border } else { fill };
            data.extend_from_slice(&pixel);
        }
    }
    make_image(images, size, data)
}

/// 円形テクスチャ
fn create_circle_texture(images: &mut Assets<Image>, size: u32, color: [u8; 4]) -> Handle<Image> {
    let center = size as f32 / 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let distance = (dx * dx + dy * dy).sqrt() / center;
            let alpha = if distance <= 0.92 {
                255
            } else if distance <= 1.0 {
                (((1.0 - distance) / 0.08) * 255.0) as u8
            } else {
                0
            };
            data.extend_from_slice(&[color[0], color[1], color[2], alpha]);
        }
    }
    make_image(images, size, data)
}

/// リング状テクスチャ（金の置き場表示用）
fn create_ring_texture(images: &mut Assets<Image>, size: u32, color: [u8; 4]) -> Handle<Image> {
    let center = size as f32 / 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let distance = (dx * dx + dy * dy).sqrt() / center;
            let alpha = if (0.78..=1.0).contains(&distance) {
                255
            } else {
                0
            };
            data.extend_from_slice(&[color[0], color[1], color[2], alpha]);
        }
    }
    make_image(images, size, data)
}

fn make_image(images: &mut Assets<Image>, size: u32, data: Vec<u8>) -> Handle<Image> {
    let image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );
    images.add(image)
}
