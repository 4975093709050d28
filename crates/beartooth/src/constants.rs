/// Penalty added for every broken unary prefix
pub const ENCODING_BIAS: i64 = 5;

/// Solver settings
pub const DEFAULT_NUM_READS: u32 = 100;
pub const DEFAULT_OUTPUT_DIR: &str = "results";
pub const ENV_OUTPUT_DIR: &str = "BEARTOOTH_OUTPUT_DIR";

/// Expected headers in sample CSV files
pub const EXPECTED_BITS_HEADER: &str = "Bits";
pub const EXPECTED_COUNT_HEADER: &str = "Count";

/// Smallest landscape that still has one bit per axis
pub const MIN_SIDE: usize = 2;

/// f(x, y), indexed as `DEFAULT_LANDSCAPE[x][y]`
pub const DEFAULT_LANDSCAPE: [[u32; 10]; 10] = [
    [4, 3, 2, 2, 3, 2, 3, 4, 4, 5],
    [3, 2, 1, 2, 2, 2, 2, 3, 4, 6],
    [3, 2, 0, 1, 2, 2, 3, 3, 5, 7],
    [3, 2, 1, 1, 2, 2, 3, 5, 7, 8],
    [3, 2, 1, 2, 3, 4, 4, 6, 7, 7],
    [2, 2, 3, 4, 4, 5, 6, 7, 6, 5],
    [2, 3, 3, 4, 5, 7, 7, 6, 5, 4],
    [4, 5, 5, 6, 6, 9, 8, 7, 5, 4],
    [5, 6, 6, 7, 8, 8, 7, 7, 6, 5],
    [7, 7, 8, 9, 9, 9, 8, 8, 6, 5],
];

/// Chains on the target hardware graph, one per logical variable (x0..x8, y0..y8)
pub const DEFAULT_EMBEDDING: [&[usize]; 18] = [
    &[122, 218, 222, 314],
    &[113, 209, 305, 309, 317],
    &[104, 200, 296, 301],
    &[107, 203, 205, 299],
    &[114, 210, 213, 306],
    &[115, 211, 307],
    &[123, 215, 219, 223, 315],
    &[105, 201, 207, 297],
    &[106, 202, 298],
    &[302, 310, 318],
    &[300, 308, 312, 316],
    &[204, 212, 216, 220],
    &[206, 208, 214],
    &[111, 112, 119, 127],
    &[108, 116, 120, 124],
    &[110, 118, 126],
    &[109, 117, 121, 125],
    &[217, 303, 311, 313, 319],
];
