/// Creates a [`Problem`](crate::Problem) from an id, title, and parameter
/// signature, with an optional description.
///
/// ```rust
/// use algoeasy::ae_problem;
///
/// let problem = ae_problem!(1, "FizzBuzz", "n: int");
/// assert_eq!(problem.id.get(), 1);
/// assert_eq!(problem.starter_code(), "def solution(n: int):\n    pass\n");
/// ```
#[macro_export]
macro_rules! ae_problem {
    ($id:expr, $title:expr, $signature:expr $(,)?) => {
        $crate::Problem::new($crate::ProblemId::new($id), $title, "", $signature)
    };
    ($id:expr, $title:expr, $signature:expr, $description:expr $(,)?) => {
        $crate::Problem::new($crate::ProblemId::new($id), $title, $description, $signature)
    };
}

/// Creates a single [`TestCase`](crate::TestCase) from inputs and the
/// expected output.
///
/// ```rust
/// use algoeasy::ae_case;
///
/// let case = ae_case!(["3", "5"] => "8");
/// assert_eq!(case.inputs, vec!["3".to_string(), "5".to_string()]);
/// assert_eq!(case.expected_output, "8");
/// ```
#[macro_export]
macro_rules! ae_case {
    ([$($input:expr),* $(,)?] => $expected:expr) => {
        $crate::TestCase::new(
            vec![$(::std::string::ToString::to_string(&$input)),*],
            $expected,
        )
    };
}

/// Creates a `Vec<TestCase>` from `[inputs] => expected` pairs.
///
/// ```rust
/// use algoeasy::ae_cases;
///
/// let cases = ae_cases![["3"] => "Fizz", ["5"] => "Buzz"];
/// assert_eq!(cases.len(), 2);
/// assert_eq!(cases[1].expected_output, "Buzz");
/// ```
#[macro_export]
macro_rules! ae_cases {
    () => {
        Vec::<$crate::TestCase>::new()
    };
    ($([$($input:expr),* $(,)?] => $expected:expr),+ $(,)?) => {
        vec![$($crate::ae_case!([$($input),*] => $expected)),+]
    };
}
