//! 五行统计: histogram over the eight characters of a chart, plus the
//! favourable/unfavourable element profile used by the naming scorer.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::chart::Chart;
use crate::ganzhi::Element;

/// Order the naming profile walks elements in when listing weak/strong ones.
pub const PROFILE_ORDER: [Element; 5] = [
    Element::Metal,
    Element::Wood,
    Element::Water,
    Element::Fire,
    Element::Earth,
];

/// Counts per element. A chart always contributes exactly eight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElementHistogram {
    counts: [u32; 5],
}

impl ElementHistogram {
    pub fn from_chart(chart: &Chart) -> Self {
        let mut h = Self::default();
        for p in chart.pillars() {
            h.add(p.stem.element());
            h.add(p.branch.element());
        }
        h
    }

    pub fn from_counts(counts: [u32; 5]) -> Self {
        Self { counts }
    }

    pub fn add(&mut self, e: Element) {
        self.counts[e.index()] += 1;
    }

    pub fn get(&self, e: Element) -> u32 {
        self.counts[e.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Strongest element; ties go to the first in 木火土金水 order.
    pub fn max_element(&self) -> Element {
        let mut best = Element::Wood;
        for e in Element::ALL {
            if self.get(e) > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// Weakest element; ties go to the first in 木火土金水 order.
    pub fn min_element(&self) -> Element {
        let mut worst = Element::Wood;
        for e in Element::ALL {
            if self.get(e) < self.get(worst) {
                worst = e;
            }
        }
        worst
    }

    pub fn spread(&self) -> u32 {
        self.get(self.max_element()) - self.get(self.min_element())
    }

    pub fn ratio(&self, e: Element) -> f64 {
        match self.total() {
            0 => 0.0,
            t => self.get(e) as f64 / t as f64,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        Element::ALL.into_iter().map(|e| (e, self.get(e)))
    }
}

impl Serialize for ElementHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (e, n) in self.iter() {
            map.serialize_entry(e.label(), &n)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementHistogram {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        let mut h = Self::default();
        for (k, v) in raw {
            let e = Element::from_label(&k)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown element {k}")))?;
            h.counts[e.index()] = v;
        }
        Ok(h)
    }
}

/// 旺 / 平 / 弱
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "旺")]
    Strong,
    #[serde(rename = "平")]
    Balanced,
    #[serde(rename = "弱")]
    Weak,
}

impl Strength {
    fn from_ratio(r: f64) -> Self {
        if r >= 0.3 {
            Strength::Strong
        } else if r >= 0.15 {
            Strength::Balanced
        } else {
            Strength::Weak
        }
    }
}

/// 喜用神 / 忌神 profile derived from a histogram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WuxingProfile {
    pub wuxing_counts: ElementHistogram,
    pub wuxing_strength: BTreeMap<Element, Strength>,
    pub xiyongshen: Vec<Element>,
    pub jishen: Vec<Element>,
    pub analysis_summary: String,
}

impl WuxingProfile {
    pub fn from_histogram(h: &ElementHistogram) -> Self {
        let wuxing_strength = Element::ALL
            .into_iter()
            .map(|e| (e, Strength::from_ratio(h.ratio(e))))
            .collect();

        let (weak, strong) = weak_and_strong(h);
        let xiyongshen = if weak.is_empty() {
            vec![Element::Wood, Element::Fire]
        } else {
            weak.clone()
        };
        let jishen = if strong.is_empty() { vec![Element::Metal] } else { strong.clone() };

        let mut summary = String::from("根据您的八字分析：");
        if !weak.is_empty() {
            summary.push_str(&format!("五行中{}较弱，", join(&weak)));
        }
        if !strong.is_empty() {
            summary.push_str(&format!("{}较旺，", join(&strong)));
        }
        summary.push_str(&format!(
            "建议起名时多用{}属性的字，避免使用{}属性的字。",
            join(&xiyongshen),
            join(&jishen)
        ));

        Self {
            wuxing_counts: *h,
            wuxing_strength,
            xiyongshen,
            jishen,
            analysis_summary: summary,
        }
    }

    pub fn from_chart(chart: &Chart) -> Self {
        Self::from_histogram(&ElementHistogram::from_chart(chart))
    }

    pub fn is_favourable(&self, e: Element) -> bool {
        self.xiyongshen.contains(&e)
    }

    pub fn is_unfavourable(&self, e: Element) -> bool {
        self.jishen.contains(&e)
    }
}

fn weak_and_strong(h: &ElementHistogram) -> (Vec<Element>, Vec<Element>) {
    let mut weak = Vec::new();
    let mut strong = Vec::new();
    if h.total() == 0 {
        return (weak, strong);
    }
    for e in PROFILE_ORDER {
        let r = h.ratio(e);
        if r < 0.1 {
            weak.push(e);
        } else if r > 0.25 {
            strong.push(e);
        }
    }
    (weak, strong)
}

pub(crate) fn join(elements: &[Element]) -> String {
    elements.iter().map(|e| e.label()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SolarDate;
    use crate::chart::calculate_chart;

    #[test]
    fn reference_chart_histogram() {
        let chart = calculate_chart(SolarDate::new(1990, 5, 15), 14).unwrap();
        let h = ElementHistogram::from_chart(&chart);
        assert_eq!(h.total(), 8);
        assert_eq!(h.get(Element::Fire), 4);
        assert_eq!(h.get(Element::Wood), 1);
        assert_eq!(h.max_element(), Element::Fire);
        assert_eq!(h.min_element(), Element::Wood);
        assert_eq!(h.spread(), 3);
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"木":1,"火":4,"土":1,"金":1,"水":1}"#
        );
    }

    #[test]
    fn histogram_always_sums_to_eight() {
        for year in (1900..=2100).step_by(7) {
            for month in 1..=12 {
                let chart = calculate_chart(SolarDate::new(year, month, 9), (month * 2) % 24).unwrap();
                assert_eq!(ElementHistogram::from_chart(&chart).total(), 8);
            }
        }
    }

    #[test]
    fn profile_lists_weak_and_strong_elements() {
        let h = ElementHistogram::from_counts([1, 4, 1, 1, 1]);
        let p = WuxingProfile::from_histogram(&h);
        // No zero counts, so the defaults apply for favourable elements.
        assert_eq!(p.xiyongshen, vec![Element::Wood, Element::Fire]);
        assert_eq!(p.jishen, vec![Element::Fire]);
        assert_eq!(p.wuxing_strength[&Element::Fire], Strength::Strong);
        assert_eq!(p.wuxing_strength[&Element::Water], Strength::Weak);
        assert_eq!(
            p.analysis_summary,
            "根据您的八字分析：火较旺，建议起名时多用木,火属性的字，避免使用火属性的字。"
        );
    }

    #[test]
    fn profile_defaults_when_nothing_stands_out() {
        let h = ElementHistogram::from_counts([2, 2, 2, 1, 1]);
        let p = WuxingProfile::from_histogram(&h);
        assert_eq!(p.jishen, vec![Element::Metal]);
        let h = ElementHistogram::from_counts([3, 3, 2, 0, 0]);
        let p = WuxingProfile::from_histogram(&h);
        assert_eq!(p.xiyongshen, vec![Element::Metal, Element::Water]);
        assert_eq!(p.jishen, vec![Element::Wood, Element::Fire]);
    }

    #[test]
    fn histogram_round_trips_through_json() {
        let h = ElementHistogram::from_counts([0, 1, 2, 3, 2]);
        let back: ElementHistogram = serde_json::from_str(&serde_json::to_string(&h).unwrap()).unwrap();
        assert_eq!(back, h);
    }
}
