/// Content-identity fingerprint derived from normalized question text.
/// Example: `math::what is 7 x 8?::14|42|54|56::56`
pub type Uid = String;
/// Stable per-object identity assigned at pool construction, distinct from
/// the content fingerprint.
/// Example: `math|junior|medium|arith_mul|17`
pub type RecordKey = String;
/// Fine-grained tag describing a question's shape or sub-topic.
/// Examples: `arith_mul`, `vocab_antonym`, `geo_capital`
pub type PatternTag = String;
/// Coarser grouping of pattern tags used for repetition capping.
/// Examples: `arith`, `vocab`, `geo`
pub type PatternGroup = String;
/// Lowercase subject label used inside fingerprints and log fields.
/// Examples: `math`, `science`, `social_studies`
pub type SubjectTag = String;
