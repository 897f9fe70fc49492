//! Static lookup data for the dial.
//!
//! The day/night table is precomputed for Perth, Western Australia
//! (31.95° S, 115.86° E, UTC+8) on the 200×200 display with a border radius
//! of 98 px. Each boundary circle passes through the sunrise and sunset
//! points on the marker track and meets the track at right angles, so it is
//! centred on the vertical axis at `100 - 98 / sin(a)` where
//! `a = π/2 - π·daylight/1440`. Near the equinoxes the circle degenerates
//! towards a straight line; `|sin(a)|` is floored at 0.005 there.

use crate::DayRecord;

/// First valid day-of-year index.
pub const FIRST_DAY_OF_YEAR: u16 = 1;
/// Last valid day-of-year index (leap years).
pub const LAST_DAY_OF_YEAR: u16 = 366;

/// Day-of-year offset of the first of each month, indexed by month (1..=12).
/// Index 0 is unused.
pub const MONTH_START_DAY: [u16; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap-year variant of [`MONTH_START_DAY`].
pub const MONTH_START_DAY_LEAP_YEAR: [u16; 13] =
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Look up the record for a 1-based day-of-year.
///
/// Valid input is `1..=366`. Anything else trips a debug assertion and, in
/// release builds, is clamped to the nearest valid day.
pub fn day_record(day_of_year: u16) -> &'static DayRecord {
    debug_assert!(
        (FIRST_DAY_OF_YEAR..=LAST_DAY_OF_YEAR).contains(&day_of_year),
        "day of year {day_of_year} outside 1..=366"
    );
    let index = day_of_year.clamp(FIRST_DAY_OF_YEAR, LAST_DAY_OF_YEAR);
    &DAY_NIGHT_LOOKUP[index as usize]
}

/// Day/night table: `DayRecord::new(center, radius, sunrise_minute, sunset_minute)`.
///
/// Index 0 mirrors day 1 so the table can be indexed directly by day-of-year.
#[rustfmt::skip]
pub static DAY_NIGHT_LOOKUP: [DayRecord; 367] = [
    DayRecord::new(445, 331, 313, 1165),
    DayRecord::new(445, 331, 313, 1165), DayRecord::new(445, 331, 314, 1166), DayRecord::new(448, 334, 315, 1166),
    DayRecord::new(450, 336, 316, 1166), DayRecord::new(450, 336, 316, 1166), DayRecord::new(453, 339, 317, 1166),
    DayRecord::new(456, 342, 318, 1166), DayRecord::new(458, 345, 319, 1166), DayRecord::new(458, 345, 319, 1166),
    DayRecord::new(461, 347, 320, 1166), DayRecord::new(464, 350, 321, 1166), DayRecord::new(467, 353, 322, 1166),
    DayRecord::new(470, 356, 323, 1166), DayRecord::new(473, 359, 324, 1166), DayRecord::new(476, 363, 325, 1166),
    DayRecord::new(479, 366, 326, 1166), DayRecord::new(482, 369, 326, 1165), DayRecord::new(485, 372, 327, 1165),
    DayRecord::new(488, 376, 328, 1165), DayRecord::new(491, 379, 329, 1165), DayRecord::new(498, 386, 330, 1164),
    DayRecord::new(502, 389, 331, 1164), DayRecord::new(509, 397, 332, 1163), DayRecord::new(512, 400, 333, 1163),
    DayRecord::new(516, 404, 334, 1163), DayRecord::new(524, 412, 335, 1162), DayRecord::new(528, 416, 336, 1162),
    DayRecord::new(536, 424, 337, 1161), DayRecord::new(540, 429, 338, 1161), DayRecord::new(548, 438, 339, 1160),
    DayRecord::new(557, 447, 340, 1159), DayRecord::new(562, 451, 341, 1159), DayRecord::new(571, 461, 342, 1158),
    DayRecord::new(576, 466, 343, 1158), DayRecord::new(581, 471, 343, 1157), DayRecord::new(592, 482, 344, 1156),
    DayRecord::new(602, 493, 345, 1155), DayRecord::new(608, 498, 346, 1155), DayRecord::new(619, 510, 347, 1154),
    DayRecord::new(632, 522, 348, 1153), DayRecord::new(644, 535, 349, 1152), DayRecord::new(657, 549, 350, 1151),
    DayRecord::new(664, 556, 351, 1151), DayRecord::new(679, 570, 352, 1150), DayRecord::new(694, 586, 353, 1149),
    DayRecord::new(710, 602, 354, 1148), DayRecord::new(726, 619, 355, 1147), DayRecord::new(744, 637, 356, 1146),
    DayRecord::new(753, 646, 356, 1145), DayRecord::new(773, 666, 357, 1144), DayRecord::new(793, 686, 358, 1143),
    DayRecord::new(815, 709, 359, 1142), DayRecord::new(839, 732, 360, 1141), DayRecord::new(863, 757, 361, 1140),
    DayRecord::new(890, 784, 362, 1139), DayRecord::new(904, 798, 362, 1138), DayRecord::new(934, 828, 363, 1137),
    DayRecord::new(966, 860, 364, 1136), DayRecord::new(1018, 913, 365, 1134), DayRecord::new(1057, 952, 366, 1133),
    DayRecord::new(1078, 973, 366, 1132), DayRecord::new(1122, 1018, 367, 1131), DayRecord::new(1171, 1067, 368, 1130),
    DayRecord::new(1224, 1120, 369, 1129), DayRecord::new(1315, 1211, 370, 1127), DayRecord::new(1349, 1245, 370, 1126),
    DayRecord::new(1422, 1319, 371, 1125), DayRecord::new(1505, 1401, 372, 1124), DayRecord::new(1650, 1547, 373, 1122),
    DayRecord::new(1705, 1602, 373, 1121), DayRecord::new(1829, 1726, 374, 1120), DayRecord::new(1973, 1870, 375, 1119),
    DayRecord::new(2143, 2040, 375, 1117), DayRecord::new(2347, 2245, 376, 1116), DayRecord::new(2596, 2494, 377, 1115),
    DayRecord::new(2908, 2806, 378, 1114), DayRecord::new(3309, 3208, 378, 1112), DayRecord::new(3844, 3742, 379, 1111),
    DayRecord::new(4592, 4491, 380, 1110), DayRecord::new(5091, 4990, 380, 1109), DayRecord::new(7587, 7486, 381, 1107),
    DayRecord::new(11330, 11230, 382, 1106), DayRecord::new(15073, 14973, 382, 1105), DayRecord::new(-19500, 19600, 383, 1103),
    DayRecord::new(-19500, 19600, 384, 1102), DayRecord::new(-14873, 14973, 384, 1101), DayRecord::new(-7387, 7486, 385, 1099),
    DayRecord::new(-5515, 5614, 386, 1098), DayRecord::new(-4891, 4990, 386, 1097), DayRecord::new(-3984, 4083, 387, 1096),
    DayRecord::new(-3109, 3208, 388, 1094), DayRecord::new(-2895, 2994, 388, 1093), DayRecord::new(-2543, 2641, 389, 1092),
    DayRecord::new(-2147, 2245, 390, 1090), DayRecord::new(-2040, 2138, 390, 1089), DayRecord::new(-1854, 1951, 391, 1088),
    DayRecord::new(-1773, 1870, 391, 1087), DayRecord::new(-1565, 1662, 392, 1085), DayRecord::new(-1450, 1547, 393, 1084),
    DayRecord::new(-1398, 1495, 393, 1083), DayRecord::new(-1305, 1401, 394, 1082), DayRecord::new(-1185, 1281, 395, 1080),
    DayRecord::new(-1149, 1245, 395, 1079), DayRecord::new(-1083, 1179, 396, 1078), DayRecord::new(-1024, 1120, 397, 1077),
    DayRecord::new(-997, 1093, 397, 1076), DayRecord::new(-946, 1042, 398, 1075), DayRecord::new(-878, 973, 399, 1073),
    DayRecord::new(-857, 952, 399, 1072), DayRecord::new(-818, 913, 400, 1071), DayRecord::new(-783, 877, 401, 1070),
    DayRecord::new(-766, 860, 401, 1069), DayRecord::new(-734, 828, 402, 1068), DayRecord::new(-704, 798, 403, 1067),
    DayRecord::new(-690, 784, 403, 1066), DayRecord::new(-663, 757, 404, 1065), DayRecord::new(-639, 732, 405, 1064),
    DayRecord::new(-627, 720, 405, 1063), DayRecord::new(-604, 697, 406, 1062), DayRecord::new(-583, 676, 407, 1061),
    DayRecord::new(-573, 666, 407, 1060), DayRecord::new(-553, 646, 408, 1059), DayRecord::new(-535, 628, 409, 1058),
    DayRecord::new(-518, 610, 410, 1057), DayRecord::new(-510, 602, 410, 1056), DayRecord::new(-494, 586, 411, 1055),
    DayRecord::new(-479, 570, 412, 1054), DayRecord::new(-471, 563, 412, 1053), DayRecord::new(-464, 556, 413, 1053),
    DayRecord::new(-451, 542, 414, 1052), DayRecord::new(-444, 535, 414, 1051), DayRecord::new(-432, 522, 415, 1050),
    DayRecord::new(-425, 516, 416, 1050), DayRecord::new(-419, 510, 416, 1049), DayRecord::new(-408, 498, 417, 1048),
    DayRecord::new(-402, 493, 418, 1048), DayRecord::new(-397, 487, 418, 1047), DayRecord::new(-386, 476, 419, 1046),
    DayRecord::new(-381, 471, 420, 1046), DayRecord::new(-376, 466, 420, 1045), DayRecord::new(-371, 461, 421, 1045),
    DayRecord::new(-362, 451, 422, 1044), DayRecord::new(-362, 451, 422, 1044), DayRecord::new(-353, 442, 423, 1043),
    DayRecord::new(-348, 438, 424, 1043), DayRecord::new(-344, 433, 424, 1042), DayRecord::new(-340, 429, 425, 1042),
    DayRecord::new(-332, 420, 426, 1041), DayRecord::new(-332, 420, 426, 1041), DayRecord::new(-328, 416, 427, 1041),
    DayRecord::new(-324, 412, 427, 1040), DayRecord::new(-320, 408, 428, 1040), DayRecord::new(-320, 408, 428, 1040),
    DayRecord::new(-316, 404, 429, 1040), DayRecord::new(-312, 400, 429, 1039), DayRecord::new(-309, 397, 430, 1039),
    DayRecord::new(-305, 393, 431, 1039), DayRecord::new(-305, 393, 431, 1039), DayRecord::new(-302, 389, 432, 1039),
    DayRecord::new(-302, 389, 432, 1039), DayRecord::new(-302, 389, 432, 1039), DayRecord::new(-298, 386, 433, 1039),
    DayRecord::new(-298, 386, 433, 1039), DayRecord::new(-295, 382, 434, 1039), DayRecord::new(-295, 382, 434, 1039),
    DayRecord::new(-295, 382, 434, 1039), DayRecord::new(-291, 379, 435, 1039), DayRecord::new(-291, 379, 435, 1039),
    DayRecord::new(-291, 379, 435, 1039), DayRecord::new(-288, 376, 436, 1039), DayRecord::new(-288, 376, 436, 1039),
    DayRecord::new(-291, 379, 436, 1040), DayRecord::new(-291, 379, 436, 1040), DayRecord::new(-288, 376, 437, 1040),
    DayRecord::new(-288, 376, 437, 1040), DayRecord::new(-288, 376, 437, 1040), DayRecord::new(-291, 379, 437, 1041),
    DayRecord::new(-291, 379, 437, 1041), DayRecord::new(-291, 379, 437, 1041), DayRecord::new(-295, 382, 437, 1042),
    DayRecord::new(-291, 379, 438, 1042), DayRecord::new(-291, 379, 438, 1042), DayRecord::new(-295, 382, 438, 1043),
    DayRecord::new(-295, 382, 438, 1043), DayRecord::new(-302, 389, 437, 1044), DayRecord::new(-302, 389, 437, 1044),
    DayRecord::new(-305, 393, 437, 1045), DayRecord::new(-305, 393, 437, 1045), DayRecord::new(-309, 397, 437, 1046),
    DayRecord::new(-309, 397, 437, 1046), DayRecord::new(-312, 400, 437, 1047), DayRecord::new(-316, 404, 436, 1047),
    DayRecord::new(-320, 408, 436, 1048), DayRecord::new(-320, 408, 436, 1048), DayRecord::new(-324, 412, 436, 1049),
    DayRecord::new(-328, 416, 435, 1049), DayRecord::new(-332, 420, 435, 1050), DayRecord::new(-332, 420, 435, 1050),
    DayRecord::new(-340, 429, 434, 1051), DayRecord::new(-344, 433, 434, 1052), DayRecord::new(-348, 438, 433, 1052),
    DayRecord::new(-353, 442, 433, 1053), DayRecord::new(-357, 447, 432, 1053), DayRecord::new(-362, 451, 432, 1054),
    DayRecord::new(-371, 461, 431, 1055), DayRecord::new(-371, 461, 431, 1055), DayRecord::new(-381, 471, 430, 1056),
    DayRecord::new(-386, 476, 430, 1057), DayRecord::new(-392, 482, 429, 1057), DayRecord::new(-402, 493, 428, 1058),
    DayRecord::new(-408, 498, 428, 1059), DayRecord::new(-414, 504, 427, 1059), DayRecord::new(-425, 516, 426, 1060),
    DayRecord::new(-438, 529, 425, 1061), DayRecord::new(-438, 529, 425, 1061), DayRecord::new(-451, 542, 424, 1062),
    DayRecord::new(-457, 549, 423, 1062), DayRecord::new(-471, 563, 422, 1063), DayRecord::new(-486, 578, 421, 1064),
    DayRecord::new(-486, 578, 421, 1064), DayRecord::new(-502, 594, 420, 1065), DayRecord::new(-518, 610, 419, 1066),
    DayRecord::new(-526, 619, 418, 1066), DayRecord::new(-544, 637, 417, 1067), DayRecord::new(-563, 656, 416, 1068),
    DayRecord::new(-573, 666, 415, 1068), DayRecord::new(-593, 686, 414, 1069), DayRecord::new(-615, 709, 413, 1070),
    DayRecord::new(-627, 720, 412, 1070), DayRecord::new(-651, 744, 411, 1071), DayRecord::new(-663, 757, 410, 1071),
    DayRecord::new(-690, 784, 409, 1072), DayRecord::new(-719, 813, 408, 1073), DayRecord::new(-749, 844, 406, 1073),
    DayRecord::new(-783, 877, 405, 1074), DayRecord::new(-818, 913, 404, 1075), DayRecord::new(-838, 932, 403, 1075),
    DayRecord::new(-878, 973, 402, 1076), DayRecord::new(-900, 995, 401, 1076), DayRecord::new(-971, 1067, 399, 1077),
    DayRecord::new(-1024, 1120, 398, 1078), DayRecord::new(-1053, 1149, 397, 1078), DayRecord::new(-1115, 1211, 396, 1079),
    DayRecord::new(-1149, 1245, 395, 1079), DayRecord::new(-1262, 1359, 393, 1080), DayRecord::new(-1350, 1447, 392, 1081),
    DayRecord::new(-1398, 1495, 391, 1081), DayRecord::new(-1565, 1662, 389, 1082), DayRecord::new(-1629, 1726, 388, 1082),
    DayRecord::new(-1773, 1870, 387, 1083), DayRecord::new(-1854, 1951, 386, 1083), DayRecord::new(-2147, 2245, 384, 1084),
    DayRecord::new(-2396, 2494, 383, 1085), DayRecord::new(-2543, 2641, 382, 1085), DayRecord::new(-3109, 3208, 380, 1086),
    DayRecord::new(-3356, 3454, 379, 1086), DayRecord::new(-3984, 4083, 378, 1087), DayRecord::new(-4891, 4990, 376, 1087),
    DayRecord::new(-6317, 6417, 375, 1088), DayRecord::new(-8884, 8984, 374, 1089), DayRecord::new(-14873, 14973, 372, 1089),
    DayRecord::new(-19500, 19600, 371, 1090), DayRecord::new(-19500, 19600, 370, 1090), DayRecord::new(15073, 14973, 368, 1091),
    DayRecord::new(9084, 8984, 367, 1092), DayRecord::new(7587, 7486, 366, 1092), DayRecord::new(5091, 4990, 364, 1093),
    DayRecord::new(4592, 4491, 363, 1093), DayRecord::new(3844, 3742, 362, 1094), DayRecord::new(3095, 2994, 360, 1095),
    DayRecord::new(2908, 2806, 359, 1095), DayRecord::new(2596, 2494, 358, 1096), DayRecord::new(2240, 2138, 356, 1097),
    DayRecord::new(2143, 2040, 355, 1097), DayRecord::new(1973, 1870, 354, 1098), DayRecord::new(1829, 1726, 352, 1098),
    DayRecord::new(1705, 1602, 351, 1099), DayRecord::new(1598, 1495, 350, 1100), DayRecord::new(1550, 1447, 349, 1100),
    DayRecord::new(1422, 1319, 347, 1101), DayRecord::new(1349, 1245, 346, 1102), DayRecord::new(1283, 1179, 345, 1103),
    DayRecord::new(1253, 1149, 344, 1103), DayRecord::new(1171, 1067, 342, 1104), DayRecord::new(1122, 1018, 341, 1105),
    DayRecord::new(1100, 995, 340, 1105), DayRecord::new(1057, 952, 339, 1106), DayRecord::new(1000, 895, 337, 1107),
    DayRecord::new(966, 860, 336, 1108), DayRecord::new(949, 844, 335, 1108), DayRecord::new(919, 813, 334, 1109),
    DayRecord::new(890, 784, 333, 1110), DayRecord::new(863, 757, 332, 1111), DayRecord::new(851, 744, 331, 1111),
    DayRecord::new(827, 720, 330, 1112), DayRecord::new(804, 697, 329, 1113), DayRecord::new(783, 676, 328, 1114),
    DayRecord::new(753, 646, 326, 1115), DayRecord::new(744, 637, 325, 1115), DayRecord::new(726, 619, 324, 1116),
    DayRecord::new(710, 602, 323, 1117), DayRecord::new(702, 594, 323, 1118), DayRecord::new(686, 578, 322, 1119),
    DayRecord::new(671, 563, 321, 1120), DayRecord::new(657, 549, 320, 1121), DayRecord::new(651, 542, 319, 1121),
    DayRecord::new(638, 529, 318, 1122), DayRecord::new(625, 516, 317, 1123), DayRecord::new(614, 504, 316, 1124),
    DayRecord::new(608, 498, 316, 1125), DayRecord::new(597, 487, 315, 1126), DayRecord::new(586, 476, 314, 1127),
    DayRecord::new(576, 466, 313, 1128), DayRecord::new(571, 461, 313, 1129), DayRecord::new(562, 451, 312, 1130),
    DayRecord::new(553, 442, 311, 1131), DayRecord::new(553, 442, 311, 1131), DayRecord::new(544, 433, 310, 1132),
    DayRecord::new(540, 429, 310, 1133), DayRecord::new(532, 420, 309, 1134), DayRecord::new(524, 412, 308, 1135),
    DayRecord::new(520, 408, 308, 1136), DayRecord::new(516, 404, 308, 1137), DayRecord::new(509, 397, 307, 1138),
    DayRecord::new(505, 393, 307, 1139), DayRecord::new(498, 386, 306, 1140), DayRecord::new(495, 382, 306, 1141),
    DayRecord::new(491, 379, 306, 1142), DayRecord::new(488, 376, 305, 1142), DayRecord::new(485, 372, 305, 1143),
    DayRecord::new(482, 369, 305, 1144), DayRecord::new(479, 366, 305, 1145), DayRecord::new(473, 359, 304, 1146),
    DayRecord::new(470, 356, 304, 1147), DayRecord::new(467, 353, 304, 1148), DayRecord::new(464, 350, 304, 1149),
    DayRecord::new(464, 350, 304, 1149), DayRecord::new(461, 347, 304, 1150), DayRecord::new(458, 345, 304, 1151),
    DayRecord::new(456, 342, 304, 1152), DayRecord::new(453, 339, 304, 1153), DayRecord::new(453, 339, 304, 1153),
    DayRecord::new(450, 336, 304, 1154), DayRecord::new(448, 334, 304, 1155), DayRecord::new(448, 334, 304, 1155),
    DayRecord::new(445, 331, 304, 1156), DayRecord::new(445, 331, 305, 1157), DayRecord::new(443, 328, 305, 1158),
    DayRecord::new(443, 328, 305, 1158), DayRecord::new(440, 326, 305, 1159), DayRecord::new(443, 328, 306, 1159),
    DayRecord::new(440, 326, 306, 1160), DayRecord::new(440, 326, 306, 1160), DayRecord::new(440, 326, 307, 1161),
    DayRecord::new(438, 323, 307, 1162), DayRecord::new(440, 326, 308, 1162), DayRecord::new(440, 326, 308, 1162),
    DayRecord::new(440, 326, 309, 1163), DayRecord::new(440, 326, 309, 1163), DayRecord::new(440, 326, 310, 1164),
    DayRecord::new(440, 326, 310, 1164), DayRecord::new(443, 328, 311, 1164), DayRecord::new(440, 326, 311, 1165),
    DayRecord::new(443, 328, 312, 1165), DayRecord::new(445, 331, 313, 1165), DayRecord::new(445, 331, 313, 1165),
];
