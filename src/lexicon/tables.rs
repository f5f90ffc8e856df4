//! Built-in conversion tables.
//!
//! Keys are lowercase Wade-Giles with `'` as the only aspiration mark; the
//! matcher normalises curly and modifier apostrophes before lookup. Values are
//! toneless Pinyin.

/// Standard Wade-Giles syllables and their Pinyin spelling.
pub const SYLLABLES: &[(&str, &str)] = &[
    // a
    ("a", "a"),
    ("ai", "ai"),
    ("an", "an"),
    ("ang", "ang"),
    ("ao", "ao"),

    // ch
    ("cha", "zha"),
    ("chai", "zhai"),
    ("chan", "zhan"),
    ("chang", "zhang"),
    ("chao", "zhao"),
    ("che", "zhe"),
    ("chen", "zhen"),
    ("cheng", "zheng"),
    ("chi", "ji"),
    ("chia", "jia"),
    ("chiang", "jiang"),
    ("chiao", "jiao"),
    ("chieh", "jie"),
    ("chien", "jian"),
    ("chih", "zhi"),
    ("chin", "jin"),
    ("ching", "jing"),
    ("chiu", "jiu"),
    ("chiung", "jiong"),
    ("cho", "zhuo"),
    ("chou", "zhou"),
    ("chu", "zhu"),
    ("chua", "zhua"),
    ("chuai", "zhuai"),
    ("chuan", "zhuan"),
    ("chuang", "zhuang"),
    ("chui", "zhui"),
    ("chun", "zhun"),
    ("chung", "zhong"),
    ("chü", "ju"),
    ("chüan", "juan"),
    ("chüeh", "jue"),
    ("chün", "jun"),

    // ch'
    ("ch'a", "cha"),
    ("ch'ai", "chai"),
    ("ch'an", "chan"),
    ("ch'ang", "chang"),
    ("ch'ao", "chao"),
    ("ch'e", "che"),
    ("ch'en", "chen"),
    ("ch'eng", "cheng"),
    ("ch'i", "qi"),
    ("ch'ia", "qia"),
    ("ch'iang", "qiang"),
    ("ch'iao", "qiao"),
    ("ch'ieh", "qie"),
    ("ch'ien", "qian"),
    ("ch'ih", "chi"),
    ("ch'in", "qin"),
    ("ch'ing", "qing"),
    ("ch'iu", "qiu"),
    ("ch'iung", "qiong"),
    ("ch'o", "chuo"),
    ("ch'ou", "chou"),
    ("ch'u", "chu"),
    ("ch'uai", "chuai"),
    ("ch'uan", "chuan"),
    ("ch'uang", "chuang"),
    ("ch'ui", "chui"),
    ("ch'un", "chun"),
    ("ch'ung", "chong"),
    ("ch'ü", "qu"),
    ("ch'üan", "quan"),
    ("ch'üeh", "que"),
    ("ch'ün", "qun"),

    // e
    ("en", "en"),
    ("erh", "er"),
    ("er", "er"),

    // f
    ("fa", "fa"),
    ("fan", "fan"),
    ("fang", "fang"),
    ("fei", "fei"),
    ("fen", "fen"),
    ("feng", "feng"),
    ("fo", "fo"),
    ("fou", "fou"),
    ("fu", "fu"),

    // h
    ("ha", "ha"),
    ("hai", "hai"),
    ("han", "han"),
    ("hang", "hang"),
    ("hao", "hao"),
    ("hei", "hei"),
    ("hen", "hen"),
    ("heng", "heng"),
    ("ho", "he"),
    ("hou", "hou"),
    ("hu", "hu"),
    ("hua", "hua"),
    ("huai", "huai"),
    ("huan", "huan"),
    ("huang", "huang"),
    ("hui", "hui"),
    ("hun", "hun"),
    ("hung", "hong"),
    ("huo", "huo"),

    // hs
    ("hsi", "xi"),
    ("hsia", "xia"),
    ("hsiang", "xiang"),
    ("hsiao", "xiao"),
    ("hsieh", "xie"),
    ("hsien", "xian"),
    ("hsin", "xin"),
    ("hsing", "xing"),
    ("hsiu", "xiu"),
    ("hsiung", "xiong"),
    ("hsü", "xu"),
    ("hsüan", "xuan"),
    ("hsüeh", "xue"),
    ("hsün", "xun"),

    // i
    ("i", "yi"),

    // j
    ("jan", "ran"),
    ("jang", "rang"),
    ("jao", "rao"),
    ("je", "re"),
    ("jen", "ren"),
    ("jeng", "reng"),
    ("jih", "ri"),
    ("jo", "ruo"),
    ("jou", "rou"),
    ("ju", "ru"),
    ("juan", "ruan"),
    ("jui", "rui"),
    ("jun", "run"),
    ("jung", "rong"),

    // k
    ("ka", "ga"),
    ("kai", "gai"),
    ("kan", "gan"),
    ("kang", "gang"),
    ("kao", "gao"),
    ("kei", "gei"),
    ("ken", "gen"),
    ("keng", "geng"),
    ("ko", "ge"),
    ("kou", "gou"),
    ("ku", "gu"),
    ("kua", "gua"),
    ("kuai", "guai"),
    ("kuan", "guan"),
    ("kuang", "guang"),
    ("kuei", "gui"),
    ("kun", "gun"),
    ("kung", "gong"),
    ("kuo", "guo"),

    // k'
    ("k'a", "ka"),
    ("k'ai", "kai"),
    ("k'an", "kan"),
    ("k'ang", "kang"),
    ("k'ao", "kao"),
    ("k'en", "ken"),
    ("k'eng", "keng"),
    ("k'o", "ke"),
    ("k'ou", "kou"),
    ("k'u", "ku"),
    ("k'ua", "kua"),
    ("k'uai", "kuai"),
    ("k'uan", "kuan"),
    ("k'uang", "kuang"),
    ("k'uei", "kui"),
    ("k'un", "kun"),
    ("k'ung", "kong"),
    ("k'uo", "kuo"),

    // l
    ("la", "la"),
    ("lai", "lai"),
    ("lan", "lan"),
    ("lang", "lang"),
    ("lao", "lao"),
    ("le", "le"),
    ("lei", "lei"),
    ("leng", "leng"),
    ("li", "li"),
    ("liang", "liang"),
    ("liao", "liao"),
    ("lieh", "lie"),
    ("lien", "lian"),
    ("lin", "lin"),
    ("ling", "ling"),
    ("liu", "liu"),
    ("lo", "luo"),
    ("lou", "lou"),
    ("lu", "lu"),
    ("luan", "luan"),
    ("lun", "lun"),
    ("lung", "long"),
    ("lü", "lü"),
    ("lüan", "luan"),
    ("lüeh", "lue"),

    // m
    ("ma", "ma"),
    ("mai", "mai"),
    ("man", "man"),
    ("mang", "mang"),
    ("mao", "mao"),
    ("mei", "mei"),
    ("men", "men"),
    ("meng", "meng"),
    ("mi", "mi"),
    ("miao", "miao"),
    ("mieh", "mie"),
    ("mien", "mian"),
    ("min", "min"),
    ("ming", "ming"),
    ("miu", "miu"),
    ("mo", "mo"),
    ("mou", "mou"),
    ("mu", "mu"),

    // n
    ("na", "na"),
    ("nai", "nai"),
    ("nan", "nan"),
    ("nang", "nang"),
    ("nao", "nao"),
    ("nei", "nei"),
    ("nen", "nen"),
    ("neng", "neng"),
    ("ni", "ni"),
    ("niang", "niang"),
    ("niao", "niao"),
    ("nieh", "nie"),
    ("nien", "nian"),
    ("nin", "nin"),
    ("ning", "ning"),
    ("niu", "niu"),
    ("no", "nuo"),
    ("nu", "nu"),
    ("nuan", "nuan"),
    ("nung", "nong"),
    ("nü", "nü"),
    ("nüeh", "nue"),

    // o
    ("o", "e"),
    ("ou", "ou"),

    // p
    ("pa", "ba"),
    ("pai", "bai"),
    ("pan", "ban"),
    ("pang", "bang"),
    ("pao", "bao"),
    ("pei", "bei"),
    ("pen", "ben"),
    ("peng", "beng"),
    ("pi", "bi"),
    ("piao", "biao"),
    ("pieh", "bie"),
    ("pien", "bian"),
    ("pin", "bin"),
    ("ping", "bing"),
    ("po", "bo"),
    ("pu", "bu"),

    // p'
    ("p'a", "pa"),
    ("p'ai", "pai"),
    ("p'an", "pan"),
    ("p'ang", "pang"),
    ("p'ao", "pao"),
    ("p'ei", "pei"),
    ("p'en", "pen"),
    ("p'eng", "peng"),
    ("p'i", "pi"),
    ("p'iao", "piao"),
    ("p'ieh", "pie"),
    ("p'ien", "pian"),
    ("p'in", "pin"),
    ("p'ing", "ping"),
    ("p'o", "po"),
    ("p'ou", "pou"),
    ("p'u", "pu"),

    // s
    ("sa", "sa"),
    ("sai", "sai"),
    ("san", "san"),
    ("sang", "sang"),
    ("sao", "sao"),
    ("se", "se"),
    ("sen", "sen"),
    ("seng", "seng"),
    ("sha", "sha"),
    ("shai", "shai"),
    ("shan", "shan"),
    ("shang", "shang"),
    ("shao", "shao"),
    ("she", "she"),
    ("shen", "shen"),
    ("sheng", "sheng"),
    ("shih", "shi"),
    ("shou", "shou"),
    ("shu", "shu"),
    ("shua", "shua"),
    ("shuai", "shuai"),
    ("shuan", "shuan"),
    ("shuang", "shuang"),
    ("shui", "shui"),
    ("shun", "shun"),
    ("shuo", "shuo"),
    ("so", "suo"),
    ("sou", "sou"),
    ("ssu", "si"),
    ("su", "su"),
    ("suan", "suan"),
    ("sui", "sui"),
    ("sun", "sun"),
    ("sung", "song"),
    ("szu", "si"),

    // t
    ("ta", "da"),
    ("tai", "dai"),
    ("tan", "dan"),
    ("tang", "dang"),
    ("tao", "dao"),
    ("te", "de"),
    ("teng", "deng"),
    ("ti", "di"),
    ("tiao", "diao"),
    ("tieh", "die"),
    ("tien", "dian"),
    ("ting", "ding"),
    ("tiu", "diu"),
    ("to", "duo"),
    ("tou", "dou"),
    ("tu", "du"),
    ("tuan", "duan"),
    ("tui", "dui"),
    ("tun", "dun"),
    ("tung", "dong"),

    // t'
    ("t'a", "ta"),
    ("t'ai", "tai"),
    ("t'an", "tan"),
    ("t'ang", "tang"),
    ("t'ao", "tao"),
    ("t'e", "te"),
    ("t'eng", "teng"),
    ("t'i", "ti"),
    ("t'iao", "tiao"),
    ("t'ieh", "tie"),
    ("t'ien", "tian"),
    ("t'ing", "ting"),
    ("t'o", "tuo"),
    ("t'ou", "tou"),
    ("t'u", "tu"),
    ("t'uan", "tuan"),
    ("t'ui", "tui"),
    ("t'un", "tun"),
    ("t'ung", "tong"),

    // ts
    ("tsa", "za"),
    ("tsai", "zai"),
    ("tsan", "zan"),
    ("tsang", "zang"),
    ("tsao", "zao"),
    ("tse", "ze"),
    ("tsei", "zei"),
    ("tsen", "zen"),
    ("tseng", "zeng"),
    ("tso", "zuo"),
    ("tsou", "zou"),
    ("tsu", "zu"),
    ("tsuan", "zuan"),
    ("tsui", "zui"),
    ("tsun", "zun"),
    ("tsung", "zong"),
    ("tzu", "zi"),

    // ts'
    ("ts'a", "ca"),
    ("ts'ai", "cai"),
    ("ts'an", "can"),
    ("ts'ang", "cang"),
    ("ts'ao", "cao"),
    ("ts'e", "ce"),
    ("ts'en", "cen"),
    ("ts'eng", "ceng"),
    ("ts'o", "cuo"),
    ("ts'ou", "cou"),
    ("ts'u", "cu"),
    ("ts'uan", "cuan"),
    ("ts'ui", "cui"),
    ("ts'un", "cun"),
    ("ts'ung", "cong"),
    ("tz'u", "ci"),

    // w
    ("wa", "wa"),
    ("wai", "wai"),
    ("wan", "wan"),
    ("wang", "wang"),
    ("wei", "wei"),
    ("wen", "wen"),
    ("weng", "weng"),
    ("wo", "wo"),
    ("wu", "wu"),

    // y
    ("ya", "ya"),
    ("yai", "yai"),
    ("yang", "yang"),
    ("yao", "yao"),
    ("yeh", "ye"),
    ("yen", "yan"),
    ("yin", "yin"),
    ("ying", "ying"),
    ("yo", "yo"),
    ("yu", "you"),
    ("yung", "yong"),
    ("yü", "yu"),
    ("yüan", "yuan"),
    ("yüeh", "yue"),
    ("yün", "yun"),
];

/// Spellings that write ü as a plain `u`, and the Cantonese-influenced `kw-`
/// syllables of postal romanization. Merged only where [`SYLLABLES`] has no
/// entry for the key.
pub const VARIANTS: &[(&str, &str)] = &[
    ("hsu", "xu"),
    ("hsuan", "xuan"),
    ("hsueh", "xue"),
    ("hsun", "xun"),
    ("yuan", "yuan"),
    ("yueh", "yue"),
    ("yun", "yun"),
    ("lueh", "lue"),
    ("nueh", "nue"),
    ("kwang", "guang"),
    ("kwan", "guan"),
    ("kwai", "guai"),
    ("kwei", "gui"),
];

/// Postal-system place names, matched only as whole words.
pub const POSTAL: &[(&str, &str)] = &[
    // provinces
    ("kwangsi", "guangxi"),
    ("kwangtung", "guangdong"),
    ("fukien", "fujian"),
    ("chekiang", "zhejiang"),
    ("kiangsi", "jiangxi"),
    ("kiangsu", "jiangsu"),
    ("shansi", "shanxi"),
    ("shensi", "shaanxi"),
    ("szechwan", "sichuan"),
    ("szechuan", "sichuan"),
    ("hopei", "hebei"),
    ("hopeh", "hebei"),
    ("honan", "henan"),
    ("hupei", "hubei"),
    ("hupeh", "hubei"),
    ("hunan", "hunan"),
    ("kansu", "gansu"),
    ("kweichow", "guizhou"),
    ("yunnan", "yunnan"),
    ("anhwei", "anhui"),
    ("chihli", "zhili"),
    ("fengtien", "fengtian"),
    ("manchuria", "manchuria"),
    // cities and regions
    ("peking", "beijing"),
    ("peiping", "beiping"),
    ("nanking", "nanjing"),
    ("canton", "guangzhou"),
    ("tientsin", "tianjin"),
    ("tsingtao", "qingdao"),
    ("chungking", "chongqing"),
    ("sian", "xian"),
    ("sinkiang", "xinjiang"),
    ("tsinghai", "qinghai"),
    ("ningsia", "ningxia"),
    ("suiyuan", "suiyuan"),
    // rivers
    ("yangtze", "yangzi"),
    ("yangtse", "yangzi"),
];

/// English words that are also syllables. Left alone when written entirely
/// in lowercase, unless the run is aggressive.
pub const ENGLISH_EXCLUSIONS: &[&str] = &[
    "to", "no", "so", "hung", "sung", "lung", "tang", "tan", "pan", "pen", "pin", "ping", "ting",
];

/// Single-letter syllables that are also English words ("a", "I", "O").
/// Only converted inside a hyphenated compound, or in aggressive mode.
pub const CONTEXT_SENSITIVE: &[&str] = &["a", "i", "o"];

/// PDF extraction renders ü as "ii". Each entry is an initial cluster and
/// the finals that may follow the corrupted vowel.
pub const ARTIFACT_RULES: &[(&str, &[&str])] = &[
    ("ch'", &["", "an", "eh", "n"]),
    ("ch", &["", "an", "eh", "n"]),
    ("hs", &["", "an", "eh", "n"]),
    ("l", &["", "an", "eh"]),
    ("n", &["", "eh"]),
    ("y", &["", "an", "eh", "n"]),
];
