//! 0을 중심으로 하는 발산형(diverging) 색상 스케일.
//!
//! ColorBrewer Red-Yellow-Green 11단계 팔레트를 사용합니다.
//! 음수는 빨강, 양수는 초록, 0은 중립 노랑으로 매핑됩니다.

use heatmap_core::ReturnGrid;
use serde::Serialize;

/// RGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` 형식.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG 상대 휘도 (0.0 ~ 1.0).
    pub fn relative_luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

/// 밝은 배경 위 주석 색상
pub const DARK_TEXT: Rgb = Rgb::new(0x26, 0x26, 0x26);
/// 어두운 배경 위 주석 색상
pub const LIGHT_TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// 이 휘도를 넘는 배경에는 어두운 글자를 사용
const LUMINANCE_THRESHOLD: f64 = 0.408;

/// RdYlGn 팔레트 (빨강 → 노랑 → 초록).
pub const RD_YL_GN: [Rgb; 11] = [
    Rgb::new(0xa5, 0x00, 0x26),
    Rgb::new(0xd7, 0x30, 0x27),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x8b),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xd9, 0xef, 0x8b),
    Rgb::new(0xa6, 0xd9, 0x6a),
    Rgb::new(0x66, 0xbd, 0x63),
    Rgb::new(0x1a, 0x98, 0x50),
    Rgb::new(0x00, 0x68, 0x37),
];

/// 0 중심 발산형 색상 스케일.
///
/// 그리드 값의 절대값 최대치(`vrange`)를 기준으로 `[-vrange, vrange]`를
/// 팔레트 전체에 대칭으로 펼칩니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScale {
    vrange: f64,
}

impl DivergingScale {
    /// 값 범위 (최소, 최대)로 스케일을 만듭니다.
    pub fn centered(min: f64, max: f64) -> Self {
        let vrange = min.abs().max(max.abs());
        Self {
            vrange: if vrange.is_finite() { vrange } else { 0.0 },
        }
    }

    /// 그리드에 존재하는 값으로 스케일을 만듭니다.
    pub fn from_grid(grid: &ReturnGrid) -> Self {
        grid.value_range()
            .map(|(lo, hi)| Self::centered(lo, hi))
            .unwrap_or(Self { vrange: 0.0 })
    }

    /// 색상 범위의 절대값 한계.
    pub fn vrange(&self) -> f64 {
        self.vrange
    }

    /// 팔레트상의 위치 (0.0 = 최대 손실, 0.5 = 0, 1.0 = 최대 이익).
    pub fn position(&self, value: f64) -> f64 {
        if self.vrange == 0.0 || !value.is_finite() {
            return 0.5;
        }
        (0.5 + value / (2.0 * self.vrange)).clamp(0.0, 1.0)
    }

    /// 값에 대응하는 색상 (팔레트 구간 선형 보간).
    pub fn color(&self, value: f64) -> Rgb {
        sample(self.position(value))
    }

    /// 값 셀 위에 쓸 주석 글자 색상.
    pub fn text_color(&self, value: f64) -> Rgb {
        text_color_for(self.color(value))
    }
}

/// 배경색 휘도에 따른 글자 색상.
pub fn text_color_for(background: Rgb) -> Rgb {
    if background.relative_luminance() > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// 팔레트의 `t` 위치 색상 (0.0 ~ 1.0).
pub fn sample(t: f64) -> Rgb {
    let last = RD_YL_GN.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * last as f64;
    let idx = (scaled.floor() as usize).min(last - 1);
    let frac = scaled - idx as f64;

    let (a, b) = (RD_YL_GN[idx], RD_YL_GN[idx + 1]);
    let lerp = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8;

    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}
