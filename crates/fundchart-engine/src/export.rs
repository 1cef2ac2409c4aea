//! 차트 내보내기 페이로드 구성.
//!
//! 내보내기 실행(엑셀 생성, 이미지 캡처, 압축)은 호스트 애플리케이션
//! 몫입니다. 이 모듈은 호스트가 그대로 사용하는 내보내기 설정과 데이터
//! 묶음을 만듭니다. 직렬화 필드 이름은 기존 내보내기 형식과 호환을
//! 유지합니다.

use serde::Serialize;

use fundchart_core::{MetricKey, SeriesPoint};

/// 날짜 열의 숫자 형식.
pub const DATE_COLUMN_FORMAT: &str = "dd-mm-yyyy";

/// 이미지 캡처에서 제외하는 요소 클래스.
pub const EXCLUDED_ELEMENT_CLASSES: [&str; 4] = [
    "performance-chart-brush",
    "performance-chart-export",
    "performance-benchmark-toggle",
    "recharts-tooltip-wrapper",
];

/// 투명 배경 지정 값.
const TRANSPARENT_BACKGROUND: &str = "transparent";

/// 내보내기 파일 이름 줄기를 만듭니다.
///
/// `<엔터티 이름>_FundPerformance_<Nav|jCurve>` 형태이며, 엔터티
/// 이름에서 ASCII 영숫자와 공백/밑줄/하이픈 외의 문자를 제거합니다.
pub fn export_file_stem(entity_name: &str, metric: MetricKey) -> String {
    let suffix = match metric {
        MetricKey::JCurve => "jCurve",
        _ => "Nav",
    };
    format!(
        "{}_FundPerformance_{}",
        sanitize_file_component(entity_name),
        suffix
    )
}

fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect()
}

/// 열 정렬.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Right,
}

/// 내보내기 표의 열 정의.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// 행 데이터에서 값을 찾는 필드 이름
    pub id: String,
    /// 표 머리글
    pub header: String,
    /// 열 표시 여부
    pub visible: bool,
    /// 정렬
    pub align: ColumnAlign,
    /// 셀 형식 (날짜 열에만 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_fmt: Option<String>,
}

/// 내보내기 표 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    /// 파일 이름 (확장자 제외)
    pub file_name: String,
    /// 시트 이름
    pub sheet_name: String,
    /// 열 정의 (열 순서 유지, 날짜 열이 마지막)
    pub columns: Vec<ColumnSpec>,
}

impl TableSettings {
    /// 활성 메트릭에 맞는 표 설정을 만듭니다.
    ///
    /// NAV 차트에서는 jCurve 열이, jCurve 차트에서는 NAV 열이
    /// 숨겨집니다.
    pub fn for_metric(metric: MetricKey, file_stem: &str) -> Self {
        let sheet_name = match metric {
            MetricKey::JCurve => "Fund Performance jCurve",
            _ => "Fund Performance NAV",
        };
        let columns = vec![
            metric_column(MetricKey::Nav, metric),
            metric_column(MetricKey::JCurve, metric),
            metric_column(MetricKey::Distributions, metric),
            metric_column(MetricKey::Contributions, metric),
            date_column(),
        ];

        Self {
            file_name: file_stem.to_string(),
            sheet_name: sheet_name.to_string(),
            columns,
        }
    }
}

fn metric_column(column: MetricKey, active: MetricKey) -> ColumnSpec {
    // 머리글은 기존 내보내기 형식을 따름 (Distributions 열만 단수형)
    let header = match column {
        MetricKey::Nav => "Nav",
        MetricKey::JCurve => "jCurve",
        MetricKey::Distributions => "Distribution",
        MetricKey::Contributions => "Contributions",
    };
    let visible = match column {
        MetricKey::Nav => active != MetricKey::JCurve,
        MetricKey::JCurve => active == MetricKey::JCurve,
        _ => true,
    };

    ColumnSpec {
        id: column.as_str().to_string(),
        header: header.to_string(),
        visible,
        align: ColumnAlign::Right,
        num_fmt: None,
    }
}

fn date_column() -> ColumnSpec {
    ColumnSpec {
        id: "x".to_string(),
        header: "Date".to_string(),
        visible: true,
        align: ColumnAlign::Right,
        num_fmt: Some(DATE_COLUMN_FORMAT.to_string()),
    }
}

/// 표 내보내기 묶음 (설정 + 행 데이터).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableExportPayload {
    /// 표 설정
    pub settings: TableSettings,
    /// 내보낼 행 (브러시로 선택된 부분집합 또는 전체)
    pub rows: Vec<SeriesPoint>,
}

/// 이미지 캡처 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// MIME 타입을 반환합니다.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }

    /// 파일 확장자를 반환합니다.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// 이미지 캡처 옵션 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageExportOption {
    /// 파일 이름 (확장자 제외)
    pub file_name: String,
    /// MIME 타입
    #[serde(rename = "type")]
    pub mime_type: String,
    /// 파일 확장자
    pub ext: String,
    /// 캡처 배경색
    pub bg_color: String,
    /// 캡처에서 제외할 요소 클래스
    pub els_to_filter: Vec<String>,
}

/// 이미지 내보내기 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesExportPayload {
    /// 캡처할 차트 요소 ID
    pub id: String,
    /// 묶음 파일 이름
    pub file_name: String,
    /// 캡처 옵션 목록
    pub opts: Vec<ImageExportOption>,
}

impl ImagesExportPayload {
    /// 표준 4종 캡처 옵션(SVG/PNG × 투명/지정 배경)을 구성합니다.
    pub fn standard(file_stem: &str, element_id: &str, background_color: &str) -> Self {
        let variants = [
            ("TransparentBackground", TRANSPARENT_BACKGROUND),
            ("WithBackground", background_color),
        ];

        let mut opts = Vec::with_capacity(4);
        for (suffix, bg_color) in variants {
            for format in [ImageFormat::Svg, ImageFormat::Png] {
                opts.push(ImageExportOption {
                    file_name: format!("{}_{}", file_stem, suffix),
                    mime_type: format.mime().to_string(),
                    ext: format.extension().to_string(),
                    bg_color: bg_color.to_string(),
                    els_to_filter: EXCLUDED_ELEMENT_CLASSES
                        .iter()
                        .map(|class| class.to_string())
                        .collect(),
                });
            }
        }

        Self {
            id: element_id.to_string(),
            file_name: file_stem.to_string(),
            opts,
        }
    }
}

/// 전체 내보내기 묶음 (표 + 이미지, 하나의 압축 파일로 묶임).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledExportPayload {
    /// 압축 파일 이름
    pub zip_file_name: String,
    /// 표 내보내기
    pub tables: TableExportPayload,
    /// 이미지 내보내기
    pub images: ImagesExportPayload,
}
