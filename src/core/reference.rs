use crate::core::GrowthError;
use crate::models::{LmsPoint, Sex};

/// Lowest age every reference table must start at
pub const MIN_REFERENCE_AGE_MONTHS: u32 = 0;
/// Highest age every reference table must reach
pub const MAX_REFERENCE_AGE_MONTHS: u32 = 60;

/// WHO Child Growth Standards, weight-for-age, boys 0-60 months
static WHO_WEIGHT_FOR_AGE_MALE: [LmsPoint; 61] = [
    LmsPoint::new(0, 0.3487, 3.3464, 0.14602),
    LmsPoint::new(1, 0.2297, 4.4709, 0.13395),
    LmsPoint::new(2, 0.1970, 5.5675, 0.12385),
    LmsPoint::new(3, 0.1738, 6.3762, 0.11727),
    LmsPoint::new(4, 0.1553, 7.0023, 0.11316),
    LmsPoint::new(5, 0.1395, 7.5105, 0.11080),
    LmsPoint::new(6, 0.1257, 7.9340, 0.10958),
    LmsPoint::new(7, 0.1134, 8.2970, 0.10902),
    LmsPoint::new(8, 0.1021, 8.6151, 0.10882),
    LmsPoint::new(9, 0.0917, 8.9014, 0.10881),
    LmsPoint::new(10, 0.0820, 9.1649, 0.10891),
    LmsPoint::new(11, 0.0730, 9.4122, 0.10906),
    LmsPoint::new(12, 0.0644, 9.6479, 0.10925),
    LmsPoint::new(13, 0.0563, 9.8749, 0.10949),
    LmsPoint::new(14, 0.0487, 10.0953, 0.10976),
    LmsPoint::new(15, 0.0413, 10.3108, 0.11007),
    LmsPoint::new(16, 0.0343, 10.5228, 0.11041),
    LmsPoint::new(17, 0.0275, 10.7319, 0.11079),
    LmsPoint::new(18, 0.0211, 10.9385, 0.11119),
    LmsPoint::new(19, 0.0148, 11.1430, 0.11164),
    LmsPoint::new(20, 0.0087, 11.3462, 0.11211),
    LmsPoint::new(21, 0.0029, 11.5486, 0.11261),
    LmsPoint::new(22, -0.0028, 11.7504, 0.11314),
    LmsPoint::new(23, -0.0083, 11.9514, 0.11369),
    LmsPoint::new(24, -0.0137, 12.1515, 0.11426),
    LmsPoint::new(25, -0.0189, 12.3502, 0.11485),
    LmsPoint::new(26, -0.0240, 12.5466, 0.11544),
    LmsPoint::new(27, -0.0289, 12.7401, 0.11604),
    LmsPoint::new(28, -0.0337, 12.9303, 0.11664),
    LmsPoint::new(29, -0.0385, 13.1169, 0.11723),
    LmsPoint::new(30, -0.0431, 13.3000, 0.11781),
    LmsPoint::new(31, -0.0476, 13.4798, 0.11839),
    LmsPoint::new(32, -0.0520, 13.6567, 0.11896),
    LmsPoint::new(33, -0.0564, 13.8309, 0.11953),
    LmsPoint::new(34, -0.0606, 14.0031, 0.12008),
    LmsPoint::new(35, -0.0648, 14.1736, 0.12062),
    LmsPoint::new(36, -0.0689, 14.3429, 0.12116),
    LmsPoint::new(37, -0.0729, 14.5113, 0.12168),
    LmsPoint::new(38, -0.0769, 14.6791, 0.12220),
    LmsPoint::new(39, -0.0808, 14.8466, 0.12271),
    LmsPoint::new(40, -0.0846, 15.0140, 0.12322),
    LmsPoint::new(41, -0.0883, 15.1813, 0.12373),
    LmsPoint::new(42, -0.0920, 15.3486, 0.12425),
    LmsPoint::new(43, -0.0957, 15.5158, 0.12478),
    LmsPoint::new(44, -0.0993, 15.6828, 0.12531),
    LmsPoint::new(45, -0.1028, 15.8497, 0.12586),
    LmsPoint::new(46, -0.1063, 16.0163, 0.12643),
    LmsPoint::new(47, -0.1097, 16.1827, 0.12700),
    LmsPoint::new(48, -0.1131, 16.3489, 0.12759),
    LmsPoint::new(49, -0.1165, 16.5150, 0.12819),
    LmsPoint::new(50, -0.1198, 16.6811, 0.12880),
    LmsPoint::new(51, -0.1230, 16.8471, 0.12943),
    LmsPoint::new(52, -0.1262, 17.0132, 0.13005),
    LmsPoint::new(53, -0.1294, 17.1792, 0.13069),
    LmsPoint::new(54, -0.1325, 17.3452, 0.13133),
    LmsPoint::new(55, -0.1356, 17.5111, 0.13197),
    LmsPoint::new(56, -0.1387, 17.6768, 0.13261),
    LmsPoint::new(57, -0.1417, 17.8422, 0.13325),
    LmsPoint::new(58, -0.1447, 18.0073, 0.13389),
    LmsPoint::new(59, -0.1477, 18.1722, 0.13453),
    LmsPoint::new(60, -0.1506, 18.3366, 0.13517),
];

/// WHO Child Growth Standards, weight-for-age, girls 0-60 months
static WHO_WEIGHT_FOR_AGE_FEMALE: [LmsPoint; 61] = [
    LmsPoint::new(0, 0.3809, 3.2322, 0.14171),
    LmsPoint::new(1, 0.1714, 4.1873, 0.13724),
    LmsPoint::new(2, 0.0962, 5.1282, 0.13000),
    LmsPoint::new(3, 0.0402, 5.8458, 0.12619),
    LmsPoint::new(4, -0.0050, 6.4237, 0.12402),
    LmsPoint::new(5, -0.0430, 6.8985, 0.12274),
    LmsPoint::new(6, -0.0756, 7.2970, 0.12204),
    LmsPoint::new(7, -0.1039, 7.6422, 0.12178),
    LmsPoint::new(8, -0.1288, 7.9487, 0.12181),
    LmsPoint::new(9, -0.1507, 8.2254, 0.12199),
    LmsPoint::new(10, -0.1700, 8.4800, 0.12223),
    LmsPoint::new(11, -0.1872, 8.7192, 0.12247),
    LmsPoint::new(12, -0.2024, 8.9481, 0.12268),
    LmsPoint::new(13, -0.2158, 9.1699, 0.12283),
    LmsPoint::new(14, -0.2278, 9.3870, 0.12294),
    LmsPoint::new(15, -0.2384, 9.6008, 0.12299),
    LmsPoint::new(16, -0.2478, 9.8124, 0.12303),
    LmsPoint::new(17, -0.2562, 10.0226, 0.12306),
    LmsPoint::new(18, -0.2637, 10.2315, 0.12309),
    LmsPoint::new(19, -0.2703, 10.4393, 0.12315),
    LmsPoint::new(20, -0.2762, 10.6464, 0.12323),
    LmsPoint::new(21, -0.2815, 10.8534, 0.12335),
    LmsPoint::new(22, -0.2862, 11.0608, 0.12350),
    LmsPoint::new(23, -0.2903, 11.2688, 0.12369),
    LmsPoint::new(24, -0.2941, 11.4775, 0.12390),
    LmsPoint::new(25, -0.2975, 11.6864, 0.12414),
    LmsPoint::new(26, -0.3005, 11.8947, 0.12441),
    LmsPoint::new(27, -0.3032, 12.1015, 0.12472),
    LmsPoint::new(28, -0.3057, 12.3059, 0.12506),
    LmsPoint::new(29, -0.3080, 12.5073, 0.12545),
    LmsPoint::new(30, -0.3101, 12.7055, 0.12587),
    LmsPoint::new(31, -0.3120, 12.9006, 0.12633),
    LmsPoint::new(32, -0.3138, 13.0930, 0.12683),
    LmsPoint::new(33, -0.3155, 13.2837, 0.12737),
    LmsPoint::new(34, -0.3171, 13.4731, 0.12794),
    LmsPoint::new(35, -0.3186, 13.6618, 0.12855),
    LmsPoint::new(36, -0.3201, 13.8503, 0.12919),
    LmsPoint::new(37, -0.3216, 14.0385, 0.12988),
    LmsPoint::new(38, -0.3230, 14.2265, 0.13059),
    LmsPoint::new(39, -0.3243, 14.4140, 0.13135),
    LmsPoint::new(40, -0.3257, 14.6010, 0.13213),
    LmsPoint::new(41, -0.3270, 14.7873, 0.13293),
    LmsPoint::new(42, -0.3283, 14.9727, 0.13376),
    LmsPoint::new(43, -0.3296, 15.1573, 0.13460),
    LmsPoint::new(44, -0.3309, 15.3410, 0.13545),
    LmsPoint::new(45, -0.3322, 15.5240, 0.13630),
    LmsPoint::new(46, -0.3335, 15.7064, 0.13716),
    LmsPoint::new(47, -0.3348, 15.8882, 0.13800),
    LmsPoint::new(48, -0.3361, 16.0697, 0.13884),
    LmsPoint::new(49, -0.3374, 16.2511, 0.13968),
    LmsPoint::new(50, -0.3387, 16.4322, 0.14051),
    LmsPoint::new(51, -0.3400, 16.6133, 0.14132),
    LmsPoint::new(52, -0.3414, 16.7942, 0.14213),
    LmsPoint::new(53, -0.3427, 16.9748, 0.14293),
    LmsPoint::new(54, -0.3440, 17.1551, 0.14371),
    LmsPoint::new(55, -0.3453, 17.3347, 0.14448),
    LmsPoint::new(56, -0.3466, 17.5136, 0.14525),
    LmsPoint::new(57, -0.3479, 17.6916, 0.14600),
    LmsPoint::new(58, -0.3492, 17.8686, 0.14675),
    LmsPoint::new(59, -0.3505, 18.0445, 0.14748),
    LmsPoint::new(60, -0.3518, 18.2193, 0.14821),
];

/// Sex-partitioned LMS reference data for one metric
///
/// Each sequence is sorted strictly ascending by age, has positive M and S,
/// and spans at least 0 to 60 months. Tables are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    male: Vec<LmsPoint>,
    female: Vec<LmsPoint>,
}

impl ReferenceTable {
    /// Build a table from custom data, validating its invariants
    pub fn new(male: Vec<LmsPoint>, female: Vec<LmsPoint>) -> Result<Self, GrowthError> {
        validate_points(Sex::Male, &male)?;
        validate_points(Sex::Female, &female)?;
        Ok(Self { male, female })
    }

    /// WHO weight-for-age standards
    pub fn who_weight_for_age() -> Self {
        Self {
            male: WHO_WEIGHT_FOR_AGE_MALE.to_vec(),
            female: WHO_WEIGHT_FOR_AGE_FEMALE.to_vec(),
        }
    }

    pub fn for_sex(&self, sex: Sex) -> &[LmsPoint] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Last anchor age for the given sex
    pub fn max_age_months(&self, sex: Sex) -> u32 {
        self.for_sex(sex)
            .last()
            .map(|p| p.age_months)
            .unwrap_or(MAX_REFERENCE_AGE_MONTHS)
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::who_weight_for_age()
    }
}

fn validate_points(sex: Sex, points: &[LmsPoint]) -> Result<(), GrowthError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(GrowthError::InvalidArgument(format!(
                "{} reference table is empty",
                sex
            )))
        }
    };

    if first.age_months > MIN_REFERENCE_AGE_MONTHS || last.age_months < MAX_REFERENCE_AGE_MONTHS {
        return Err(GrowthError::InvalidArgument(format!(
            "{} reference table must cover {}-{} months, covers {}-{}",
            sex, MIN_REFERENCE_AGE_MONTHS, MAX_REFERENCE_AGE_MONTHS, first.age_months, last.age_months
        )));
    }

    for pair in points.windows(2) {
        if pair[1].age_months <= pair[0].age_months {
            return Err(GrowthError::InvalidArgument(format!(
                "{} reference table is not strictly ascending at {} months",
                sex, pair[1].age_months
            )));
        }
    }

    if let Some(bad) = points
        .iter()
        .find(|p| !(p.m > 0.0 && p.s > 0.0 && p.l.is_finite() && p.m.is_finite() && p.s.is_finite()))
    {
        return Err(GrowthError::InvalidArgument(format!(
            "{} reference point at {} months needs finite L and positive M, S",
            sex, bad.age_months
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_who_tables_are_valid() {
        let table = ReferenceTable::who_weight_for_age();
        assert!(ReferenceTable::new(table.male.clone(), table.female.clone()).is_ok());
        assert_eq!(table.max_age_months(Sex::Male), 60);
        assert_eq!(table.max_age_months(Sex::Female), 60);
    }

    #[test]
    fn test_known_medians() {
        let table = ReferenceTable::default();
        let boy_24 = table.for_sex(Sex::Male)[24];
        assert_eq!(boy_24.age_months, 24);
        assert_eq!(boy_24.m, 12.1515);

        let girl_12 = table.for_sex(Sex::Female)[12];
        assert_eq!(girl_12.age_months, 12);
        assert_eq!(girl_12.m, 8.9481);
    }

    #[test]
    fn test_rejects_unsorted_table() {
        let mut male = WHO_WEIGHT_FOR_AGE_MALE.to_vec();
        male.swap(3, 4);
        let result = ReferenceTable::new(male, WHO_WEIGHT_FOR_AGE_FEMALE.to_vec());
        assert!(matches!(result, Err(GrowthError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_short_or_degenerate_table() {
        let short = WHO_WEIGHT_FOR_AGE_MALE[..30].to_vec();
        assert!(ReferenceTable::new(short, WHO_WEIGHT_FOR_AGE_FEMALE.to_vec()).is_err());

        let mut zero_median = WHO_WEIGHT_FOR_AGE_FEMALE.to_vec();
        zero_median[10].m = 0.0;
        assert!(ReferenceTable::new(WHO_WEIGHT_FOR_AGE_MALE.to_vec(), zero_median).is_err());

        assert!(ReferenceTable::new(vec![], WHO_WEIGHT_FOR_AGE_FEMALE.to_vec()).is_err());
    }
}
