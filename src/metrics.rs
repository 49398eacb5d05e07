use crate::models::{Advice, Metric, MetricsResponse};

const METRICS: [Metric; 4] = [
    Metric {
        name: "Спорт",
        value: 75,
        goal: 100,
        unit: "мин",
        icon: "Dumbbell",
        color: "bg-primary",
        trend: 12,
    },
    Metric {
        name: "Питание",
        value: 85,
        goal: 100,
        unit: "%",
        icon: "Apple",
        color: "bg-growth",
        trend: 5,
    },
    Metric {
        name: "Сон",
        value: 68,
        goal: 100,
        unit: "часов",
        icon: "Moon",
        color: "bg-calm",
        trend: -3,
    },
    Metric {
        name: "Активность",
        value: 92,
        goal: 100,
        unit: "шагов",
        icon: "Activity",
        color: "bg-energy",
        trend: 18,
    },
];

const ADVICE: Advice = Advice {
    title: "Совет дня",
    text: "Начните утро со стакана воды и 5 минут растяжки. Это запустит метаболизм и подготовит тело к продуктивному дню.",
    category: "Здоровье",
};

pub fn metrics() -> Vec<Metric> {
    METRICS.to_vec()
}

/// Rounded mean of the metric values.
pub fn total_progress(metrics: &[Metric]) -> u8 {
    if metrics.is_empty() {
        return 0;
    }
    let sum: u32 = metrics.iter().map(|metric| u32::from(metric.value)).sum();
    (f64::from(sum) / metrics.len() as f64).round() as u8
}

pub fn advice_of_day() -> Advice {
    ADVICE
}

pub fn build_metrics() -> MetricsResponse {
    let metrics = metrics();
    MetricsResponse {
        total_progress: total_progress(&metrics),
        metrics,
    }
}
